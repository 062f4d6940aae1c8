// src/ui/main_menu.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{
    Component, ComponentEnum, NewGameMenu, SettingsMenu,
    draw::{
        center_rect, is_too_small, render_art, render_header, render_status, render_title,
        render_too_small,
    },
};
use crate::{
    app::Action,
    context::Context,
    message::MessageType,
};

const MENU_ITEMS: [&str; 3] = ["Start a new game", "Settings", "Quit"];

#[derive(Debug, Default)]
pub struct MainMenu {
    selected: usize,
}

impl Component for MainMenu {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = (self.selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % MENU_ITEMS.len();
                None
            }
            KeyCode::Enter => self.select(context),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = c.to_digit(10).unwrap_or(0) as usize;
                if (1..=MENU_ITEMS.len()).contains(&index) {
                    self.selected = index - 1;
                    self.select(context)
                } else {
                    None
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if is_too_small(area) {
            render_too_small(buffer, area);
            return;
        }

        let show_art = area.height >= 45;
        let [header, art, title, console, menu, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(if show_art { 16 } else { 0 }),
            Constraint::Length(8),
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header(buffer, header);
        if show_art {
            render_art(buffer, art);
        }
        render_title(buffer, title);
        self.render_console(buffer, context, console);
        self.render_menu(buffer, menu);
        render_status(buffer, status, "Press q to quit");
    }
}

impl MainMenu {
    fn select(&self, context: &mut Context) -> Option<Action> {
        match self.selected {
            0 => Some(Action::SwitchComponent(ComponentEnum::from(
                NewGameMenu::default(),
            ))),
            1 => Some(Action::SwitchComponent(ComponentEnum::from(
                SettingsMenu::new(context.settings),
            ))),
            _ => Some(Action::Quit),
        }
    }

    fn render_console(&self, buffer: &mut Buffer, context: &Context, area: Rect) {
        let console_area = center_rect(area, Constraint::Percentage(90), Constraint::Length(2));

        let console_message = context
            .messages
            .last()
            .filter(|message| message.message_type == MessageType::System)
            .map(|message| message.content.clone())
            .or_else(|| {
                (!context.ai_ready).then(|| {
                    "No API key configured: the game runs with offline content. Add one in Settings."
                        .to_string()
                })
            });

        if let Some(message) = console_message {
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .render(console_area, buffer);
        }
    }

    fn render_menu(&self, buffer: &mut Buffer, area: Rect) {
        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, &item)| {
                let number = format!("{}. ", i + 1);
                if i == self.selected {
                    Line::from(vec![
                        Span::styled(number, Style::default().fg(Color::Yellow)),
                        Span::styled(
                            item,
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![Span::raw(number), Span::raw(item)])
                }
            })
            .collect();

        let max_width = menu_lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let centered_area = center_rect(
            area,
            Constraint::Length(max_width),
            Constraint::Length(MENU_ITEMS.len() as u16),
        );

        Paragraph::new(menu_lines)
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::White))
            .render(centered_area, buffer);
    }
}
