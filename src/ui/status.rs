//! Loading and error overlays shown in place of the current step.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::source::QuizGenerationError;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let spinner = SPINNER[app.tick() % SPINNER.len()];
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            spinner,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Synthesizing challenges...",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from("n start over  ·  q quit".fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        centered(area, 8),
    );
}

pub fn render_error(frame: &mut Frame, area: Rect, error: &QuizGenerationError) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ARENA FAULT",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r retry generation",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("n start over  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red),
        );
    frame.render_widget(widget, centered(area, 10));
}

fn centered(area: Rect, height: u16) -> Rect {
    Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area)[1]
}
