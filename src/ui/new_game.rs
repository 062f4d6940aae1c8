// ui/new_game.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};
use strum::IntoEnumIterator;
use tui_textarea::TextArea;

use super::{
    Component, ComponentEnum, MainMenu,
    constants::TOTAL_MONTHS_HINT,
    draw::{center_rect, is_too_small, render_header, render_status, render_too_small},
    game::format_money,
};
use crate::{app::Action, context::Context, mode::Mode};

#[derive(Debug)]
pub struct NewGameMenu {
    textarea: TextArea<'static>,
    mode: Mode,
    warning: Option<&'static str>,
}

impl Default for NewGameMenu {
    fn default() -> Self {
        Self {
            textarea: new_textarea("Describe your startup idea"),
            mode: Mode::default(),
            warning: None,
        }
    }
}

impl Component for NewGameMenu {
    fn on_key(&mut self, key: KeyEvent, _context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SwitchComponent(ComponentEnum::from(
                MainMenu::default(),
            ))),
            KeyCode::Tab => {
                self.cycle_mode(1);
                None
            }
            KeyCode::BackTab => {
                self.cycle_mode(-1);
                None
            }
            KeyCode::Enter => {
                let idea = self.textarea.lines().join(" ");
                if idea.trim().is_empty() {
                    self.warning = Some("Please describe your idea before starting.");
                    return None;
                }
                Some(Action::StartNewGame {
                    idea: idea.trim().to_string(),
                    mode: self.mode,
                })
            }
            _ => {
                self.warning = None;
                self.textarea.input(key);
                None
            }
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if is_too_small(area) {
            render_too_small(buffer, area);
            return;
        }

        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);
        render_header(buffer, header);

        let body = center_rect(body, Constraint::Percentage(70), Constraint::Length(13));
        let [intro, input, mode, warning] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(2),
        ])
        .areas(body);

        Paragraph::new(TOTAL_MONTHS_HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green))
            .render(intro, buffer);

        self.textarea.set_block(
            Block::default()
                .title(" Startup idea ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        self.textarea.render(input, buffer);

        self.render_modes(buffer, context, mode);

        if let Some(text) = self.warning {
            Paragraph::new(text.red())
                .alignment(Alignment::Center)
                .render(warning, buffer);
        }

        render_status(
            buffer,
            status,
            "Type your idea. Tab to change mode. Enter to start, Esc to go back",
        );
    }
}

impl NewGameMenu {
    fn cycle_mode(&mut self, step: isize) {
        let modes: Vec<Mode> = Mode::iter().collect();
        let current = modes.iter().position(|m| *m == self.mode).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(modes.len() as isize) as usize;
        self.mode = modes[next];
    }

    fn render_modes(&self, buffer: &mut Buffer, context: &Context, area: Rect) {
        let language = context.settings.language;
        let spans: Vec<Span> = Mode::iter()
            .map(|mode| {
                let label = format!("[{}] ", mode.label(language));
                if mode == self.mode {
                    Span::styled(
                        label,
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(label, Style::default().fg(Color::White))
                }
            })
            .collect();

        let lines = vec![
            Line::from(spans),
            Line::from(Span::styled(
                format!("Starting cash: {}", format_money(self.mode.starting_cash())),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                self.mode.style_instructions(),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Mode ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buffer);
    }
}

pub fn new_textarea(placeholder: impl Into<String>) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea.set_cursor_line_style(Style::default());
    textarea
}
