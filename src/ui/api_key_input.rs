// ui/api_key_input.rs

use crate::{app::Action, context::Context};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Alignment, Buffer, Rect},
    style::{Color, Style, Stylize},
    widgets::*,
};
use tui_textarea::TextArea;

use super::{Component, ComponentEnum, SettingsMenu, center_rect, new_game::new_textarea};

#[derive(Debug)]
pub struct ApiKeyInput {
    textarea: TextArea<'static>,
}

impl Component for ApiKeyInput {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::SwitchComponent(ComponentEnum::from(
                SettingsMenu::new(context.settings),
            ))),
            KeyCode::Enter => self.validate_key(),
            _ => {
                self.textarea.input(key);
                None
            }
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let centered_area =
            center_rect(area, Constraint::Percentage(70), Constraint::Percentage(50));
        let [title_area, input_area, info_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(centered_area);

        let title = if context.ai_ready {
            Paragraph::new(" Your Api Key is valid! ".bold())
                .style(Style::default().fg(Color::Green))
                .alignment(Alignment::Center)
        } else {
            Paragraph::new(" Please input a Valid Api Key ")
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
        };
        title.render(title_area, buffer);

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        self.textarea.render(input_area, buffer);

        Paragraph::new(" Paste your key and press Enter, insert 'reset' to forget it, Esc to go back ")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .render(info_area, buffer);
    }
}

impl ApiKeyInput {
    pub fn new(api_key: &Option<String>) -> Self {
        let placeholder = match api_key {
            None => "Please input a valid Api key".to_string(),
            Some(api_key) => hide_api(api_key),
        };
        Self {
            textarea: new_textarea(placeholder),
        }
    }

    fn validate_key(&mut self) -> Option<Action> {
        let api_key = self.textarea.lines().join("").trim().to_string();
        if api_key.is_empty() {
            self.textarea =
                new_textarea("Please input a valid Api Key (or 'reset' to reset your Api Key)");
            return None;
        }
        if api_key.to_lowercase().starts_with("reset") {
            self.textarea = new_textarea("Your Api key has been reset.");
            return Some(Action::ResetApiKey);
        }

        self.textarea = new_textarea(" Please wait a moment while we verify the key");
        Some(Action::ValidateApiKey(api_key))
    }
}

fn hide_api(s: &str) -> String {
    let head_len = 7;
    let tail_len = 3;

    if s.len() < head_len + tail_len + 3 || !s.is_ascii() {
        return "*".repeat(s.chars().count());
    }

    format!(
        "{}{}{}",
        &s[..head_len],
        "*".repeat(s.len() - head_len - tail_len),
        &s[s.len() - tail_len..]
    )
}
