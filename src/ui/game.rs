use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};

use super::{
    Component,
    draw::{is_too_small, render_status, render_too_small},
    spinner::spinner_frame,
};
use crate::{
    app::Action,
    context::Context,
    expenses::Expenses,
    game_state::TOTAL_MONTHS,
    message::{Message, MessageType},
    packet::{OptionLabel, PacketOption},
    session::{GameSession, Phase, Verdict},
};

#[derive(Debug)]
pub struct GameView {
    selected: OptionLabel,
    scroll_from_bottom: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            selected: OptionLabel::A,
            scroll_from_bottom: 0,
        }
    }
}

impl Component for GameView {
    fn on_key(&mut self, key: KeyEvent, context: &mut Context) -> Option<Action> {
        let phase = context.session.map(GameSession::phase)?;

        match key.code {
            KeyCode::Esc => return Some(Action::Reset),
            KeyCode::Char('r') => return Some(Action::RestartGame),
            KeyCode::PageUp | KeyCode::Up => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1);
                return None;
            }
            KeyCode::PageDown | KeyCode::Down => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1);
                return None;
            }
            _ => {}
        }

        match (phase, key.code) {
            (Phase::AwaitingChoice, KeyCode::Char('a' | 'A')) => self.choose(OptionLabel::A),
            (Phase::AwaitingChoice, KeyCode::Char('b' | 'B')) => self.choose(OptionLabel::B),
            (Phase::AwaitingChoice, KeyCode::Left | KeyCode::Right | KeyCode::Tab) => {
                self.selected = self.selected.other();
                None
            }
            (Phase::AwaitingChoice, KeyCode::Enter) => self.choose(self.selected),
            (Phase::Resolved, KeyCode::Enter | KeyCode::Char('n')) => {
                self.scroll_from_bottom = 0;
                Some(Action::NextMonth)
            }
            (Phase::Complete, KeyCode::Enter) => Some(Action::Reset),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if is_too_small(area) {
            render_too_small(buffer, area);
            return;
        }
        let Some(session) = context.session else {
            render_status(buffer, area, "No game in progress. Press Esc to go back.");
            return;
        };

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(area);
        let decision_height = match session.phase() {
            Phase::AwaitingChoice => 9,
            _ => 3,
        };
        let [transcript, decision, hints] = Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(decision_height),
            Constraint::Length(1),
        ])
        .areas(left);

        self.render_transcript(buffer, context.messages, session, transcript);
        self.render_decision(buffer, context, session, decision);
        render_status(buffer, hints, key_hints(session.phase()));
        draw_metrics(buffer, context, session, right);
    }
}

impl GameView {
    fn choose(&mut self, label: OptionLabel) -> Option<Action> {
        self.selected = OptionLabel::A;
        self.scroll_from_bottom = 0;
        Some(Action::Choose(label))
    }

    fn render_transcript(
        &mut self,
        buffer: &mut Buffer,
        messages: &[Message],
        session: &GameSession,
        area: Rect,
    ) {
        let block = Block::default()
            .title(format!(" {} ", session.state().idea))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        block.render(area, buffer);

        let max_width = inner.width.saturating_sub(2) as usize;
        let max_height = inner.height as usize;
        let all_lines = parse_game_content(messages, max_width);

        let max_scroll = all_lines.len().saturating_sub(max_height);
        self.scroll_from_bottom = self.scroll_from_bottom.min(max_scroll);
        let skip = max_scroll - self.scroll_from_bottom;

        let visible_lines: Vec<Line> = all_lines.into_iter().skip(skip).take(max_height).collect();
        Paragraph::new(visible_lines).render(inner, buffer);
    }

    fn render_decision(
        &self,
        buffer: &mut Buffer,
        context: &Context,
        session: &GameSession,
        area: Rect,
    ) {
        match session.phase() {
            Phase::AwaitingChoice => {
                let Some(outcome) = session.current() else {
                    return;
                };
                let [a, b] = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                    .areas(area);
                for ((label, option), card_area) in outcome.packet().options.iter().zip([a, b]) {
                    draw_choice_card(buffer, label, option, label == self.selected, card_area);
                }
            }
            Phase::Generating | Phase::Intro => {
                Paragraph::new(spinner_frame(context.spinner))
                    .style(Style::default().fg(Color::Green))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                    .render(area, buffer);
            }
            Phase::Resolved => {
                Paragraph::new(format!(
                    " Month {} is closed. Press Enter to face month {}. ",
                    session.state().month.saturating_sub(1),
                    session.state().month
                ))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .render(area, buffer);
            }
            Phase::Complete => {
                let (text, color) = match session.verdict() {
                    Some(Verdict::Bankrupt) => (" The company ran out of cash. ", Color::Red),
                    _ => (" You kept the company alive for a year! ", Color::Green),
                };
                Paragraph::new(text)
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                    .render(area, buffer);
            }
        }
    }
}

fn draw_choice_card(
    buffer: &mut Buffer,
    label: OptionLabel,
    option: &PacketOption,
    selected: bool,
    area: Rect,
) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(Span::styled(
            option.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            option.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {label} "))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        )
        .render(area, buffer);
}

fn draw_metrics(buffer: &mut Buffer, context: &Context, session: &GameSession, area: Rect) {
    let state = session.state();
    let metrics = &state.metrics;
    let label_style = Style::default().fg(Color::DarkGray);
    let cash_style = if metrics.cash < 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Mode       ", label_style),
            Span::raw(state.mode.label(context.settings.language)),
        ]),
        Line::from(vec![
            Span::styled("Month      ", label_style),
            Span::raw(format!("{} / {TOTAL_MONTHS}", state.month)),
        ]),
        Line::from(vec![
            Span::styled("Cash       ", label_style),
            Span::styled(format_money(metrics.cash), cash_style),
        ]),
        Line::from(vec![
            Span::styled("Team       ", label_style),
            Span::raw(metrics.team.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Reputation ", label_style),
            Span::raw(format!("{}/100", metrics.reputation())),
        ]),
        Line::from(vec![
            Span::styled("Runway     ", label_style),
            Span::raw(format!("{} months", state.runway_months())),
        ]),
        Line::from(""),
    ];

    if session.phase() != Phase::Complete {
        lines.push(Line::from(Span::styled(
            "This month's burn",
            Style::default().fg(Color::Yellow),
        )));
        lines.extend(expense_lines(&state.upcoming_expenses()));
        lines.push(Line::from(""));
    }

    if let Some(report) = session.last_report() {
        lines.push(Line::from(Span::styled(
            format!("Month {} ({}: {})", report.month, report.label, report.title),
            Style::default().fg(Color::Yellow),
        )));
        lines.extend(expense_lines(&report.expenses));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Company ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green)),
        )
        .render(area, buffer);
}

fn expense_lines(expenses: &Expenses) -> Vec<Line<'static>> {
    [
        ("  Salaries  ", expenses.salary),
        ("  Servers   ", expenses.server),
        ("  Marketing ", expenses.marketing),
        ("  Total     ", expenses.total),
    ]
    .into_iter()
    .map(|(label, amount)| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::raw(format_money(amount)),
        ])
    })
    .collect()
}

fn key_hints(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingChoice => "a/b or ←→ + Enter to decide, ↑↓ scroll, r restart, Esc quit to menu",
        Phase::Resolved => "Enter for the next month, ↑↓ scroll, r restart, Esc quit to menu",
        Phase::Complete => "Enter to return to the menu, r to play again",
        Phase::Generating | Phase::Intro => "Generating the month… ↑↓ scroll, Esc quit to menu",
    }
}

/// Formats an amount with thousands separators, e.g. `-1,234,567`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Wraps the transcript into styled lines: narration left, player right,
/// system notes centred.
pub fn parse_game_content(messages: &[Message], max_width: usize) -> Vec<Line<'static>> {
    let mut all_lines = Vec::new();

    for message in messages {
        let (style, alignment) = match message.message_type {
            MessageType::Game => (Style::default().fg(Color::Green), Alignment::Left),
            MessageType::User => (Style::default().fg(Color::Cyan), Alignment::Right),
            MessageType::System => (Style::default().fg(Color::Yellow), Alignment::Center),
        };

        for line in textwrap::wrap(&message.content, max_width.max(1)) {
            all_lines.push(Line::styled(line.into_owned(), style).alignment(alignment));
        }
        all_lines.push(Line::from(""));
    }

    all_lines
}
