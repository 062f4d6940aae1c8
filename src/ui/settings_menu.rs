// ui/settings_menu.rs

use crate::{
    app::Action,
    context::Context,
    mode::Language,
    settings::{MODELS, Settings, get_game_data_dir},
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    prelude::Buffer,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};
use strum::IntoEnumIterator;

use super::{
    Component, ComponentEnum, MainMenu,
    api_key_input::ApiKeyInput,
    draw::{
        center_rect, is_too_small, render_header, render_status, render_title, render_too_small,
    },
};

const LANGUAGE: usize = 0;
const API_KEY: usize = 1;
const MODEL: usize = 2;
const DEBUG_MODE: usize = 3;
const SETTING_NAMES: [&str; 4] = ["Language", "AI API Key", "OpenAI Model", "Debug Mode"];

#[derive(Debug)]
pub struct SettingsMenu {
    selected_setting: usize,
    selected_options: [usize; 4],
}

impl Component for SettingsMenu {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_setting =
                    (self.selected_setting + SETTING_NAMES.len() - 1) % SETTING_NAMES.len();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_setting = (self.selected_setting + 1) % SETTING_NAMES.len();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.change_setting(-1, context);
                None
            }
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => {
                if self.selected_setting == API_KEY {
                    return Some(Action::SwitchComponent(ComponentEnum::from(
                        ApiKeyInput::new(&context.settings.openai_api_key),
                    )));
                }
                self.change_setting(1, context);
                None
            }
            KeyCode::Esc => Some(Action::SwitchComponent(ComponentEnum::from(
                MainMenu::default(),
            ))),
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(digit) if (1..=SETTING_NAMES.len() as u32).contains(&digit) => {
                    self.selected_setting = digit as usize - 1;
                    if self.selected_setting == API_KEY {
                        return Some(Action::SwitchComponent(ComponentEnum::from(
                            ApiKeyInput::new(&context.settings.openai_api_key),
                        )));
                    }
                    self.change_setting(1, context);
                    None
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if is_too_small(area) {
            render_too_small(buffer, area);
            return;
        }

        let [header, title, console, settings, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(8),
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header(buffer, header);
        render_title(buffer, title);
        self.render_console(buffer, console);
        self.render_settings(buffer, context, settings);
        render_status(
            buffer,
            status,
            "Move with ↑↓, change with ←→ or Enter, Esc to go back",
        );
    }
}

impl SettingsMenu {
    pub fn new(settings: &Settings) -> Self {
        let language = Language::iter()
            .position(|language| language == settings.language)
            .unwrap_or(0);
        // A model missing from the list sits one past its end until cycled.
        let model = MODELS
            .iter()
            .position(|model| *model == settings.model)
            .unwrap_or(MODELS.len());

        Self {
            selected_setting: 0,
            selected_options: [language, 0, model, usize::from(settings.debug_mode)],
        }
    }

    fn option_labels(setting: usize) -> Vec<String> {
        match setting {
            LANGUAGE => Language::iter().map(|language| language.to_string()).collect(),
            MODEL => MODELS.iter().map(|model| model.to_string()).collect(),
            DEBUG_MODE => vec!["Off".to_string(), "On".to_string()],
            _ => Vec::new(),
        }
    }

    fn render_settings(&self, buffer: &mut Buffer, context: &Context, area: Rect) {
        let text: Vec<Line> = SETTING_NAMES
            .iter()
            .enumerate()
            .map(|(number, setting)| {
                let highlight_line_style = if number == self.selected_setting {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                let mut spans = vec![
                    Span::styled(
                        format!("{}. ", number + 1),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(format!("{:<20}", setting), highlight_line_style),
                ];

                if number == API_KEY {
                    spans.push(if context.ai_ready {
                        Span::styled("[Valid]", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("[Not Valid]", Style::default().fg(Color::Red))
                    });
                } else {
                    let selected_option = self.selected_options[number];
                    spans.extend(Self::option_labels(number).into_iter().enumerate().map(
                        |(option_number, option)| {
                            let option_style = if option_number == selected_option {
                                Style::default().fg(Color::Green)
                            } else {
                                Style::default().fg(Color::White)
                            };
                            Span::styled(format!("[{}] ", option), option_style)
                        },
                    ));
                    if number == MODEL && selected_option >= MODELS.len() {
                        spans.push(Span::styled(
                            format!("[{}] ", context.settings.model),
                            Style::default().fg(Color::Green),
                        ));
                    }
                }

                Line::from(spans)
            })
            .collect();

        let max_width = text.iter().map(|line| line.width()).max().unwrap_or(0) as u16;
        let settings_area = center_rect(
            area,
            Constraint::Length(max_width),
            Constraint::Length(text.len() as u16),
        );

        Paragraph::new(text)
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::White))
            .render(settings_area, buffer);
    }

    fn render_console(&self, buffer: &mut Buffer, area: Rect) {
        let console_text = format!(
            "The Settings are saved at: {}",
            get_game_data_dir().join("settings.json").display()
        );

        Paragraph::new(console_text)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .render(area, buffer);
    }

    fn change_setting(&mut self, change: isize, context: &mut Context) {
        let setting = self.selected_setting;
        let count = Self::option_labels(setting).len() as isize;
        if count == 0 {
            return;
        }
        let current = self.selected_options[setting] as isize;
        // Stepping forward from an unlisted model lands on the first one.
        let current = if current >= count && change > 0 { -1 } else { current };
        self.selected_options[setting] = (current + change).rem_euclid(count) as usize;
        self.apply_setting(setting, context);
    }

    fn apply_setting(&self, setting: usize, context: &mut Context) {
        let previous = context.settings.clone();
        let option = self.selected_options[setting];

        match setting {
            LANGUAGE => {
                if let Some(language) = Language::iter().nth(option) {
                    context.settings.language = language;
                }
            }
            MODEL => {
                if let Some(model) = MODELS.get(option) {
                    context.settings.model = model.to_string();
                }
            }
            DEBUG_MODE => context.settings.debug_mode = option == 1,
            _ => {}
        }

        if *context.settings != previous {
            if let Err(e) = context.settings.save() {
                log::error!("Failed to save settings: {e:#?}");
            }
        }
    }
}
