// ui/draw.rs

use super::constants::{ART, TITLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

pub fn center_rect(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

pub fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

pub fn render_too_small(buffer: &mut Buffer, area: Rect) {
    Paragraph::new("Terminal too small. Please resize.")
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .render(area, buffer);
}

pub fn render_header(buffer: &mut Buffer, area: Rect) {
    let header = Paragraph::new(format!("Runway Ratatui v{}", env!("CARGO_PKG_VERSION")))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().border_type(BorderType::Rounded))
        .alignment(Alignment::Center);
    header.render(area, buffer);
}

pub fn render_art(buffer: &mut Buffer, area: Rect) {
    let inner_rect = center_rect(area, Constraint::Length(64), Constraint::Length(14));

    let inner_block = Block::default()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Green));
    inner_block.render(inner_rect, buffer);

    let art = Paragraph::new(ART)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green));
    art.render(inner_rect, buffer);
}

pub fn render_title(buffer: &mut Buffer, area: Rect) {
    let title_area = center_rect(area, Constraint::Length(40), Constraint::Length(7));

    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Left)
        .style(Style::default().fg(Color::Green));
    title.render(title_area, buffer);
}

pub fn render_status(buffer: &mut Buffer, area: Rect, status: &str) {
    Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(area, buffer);
}
