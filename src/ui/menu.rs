//! Topic, difficulty and count pickers.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Difficulty, QUESTION_COUNTS, Topic};

struct Entry {
    label: String,
    detail: String,
}

pub fn render_topics(frame: &mut Frame, area: Rect, app: &App) {
    let entries: Vec<Entry> = Topic::ALL
        .iter()
        .map(|topic| Entry {
            label: topic.name().to_string(),
            detail: topic.description().to_string(),
        })
        .collect();

    render_menu(
        frame,
        area,
        "DEV QUIZ",
        "AI generated challenges across 9 core technologies",
        &entries,
        app.cursor(),
        "j/k navigate  ·  enter select  ·  q quit",
    );
}

pub fn render_difficulties(frame: &mut Frame, area: Rect, app: &App) {
    let entries: Vec<Entry> = Difficulty::ALL
        .iter()
        .map(|difficulty| Entry {
            label: difficulty.label().to_string(),
            detail: difficulty.description().to_string(),
        })
        .collect();

    let subtitle = app
        .session()
        .topic()
        .map_or_else(String::new, |topic| topic.name().to_string());

    render_menu(
        frame,
        area,
        "CHOOSE YOUR LEVEL",
        &subtitle,
        &entries,
        app.cursor(),
        "j/k navigate  ·  enter select  ·  esc back  ·  q quit",
    );
}

pub fn render_counts(frame: &mut Frame, area: Rect, app: &App) {
    let entries: Vec<Entry> = QUESTION_COUNTS
        .iter()
        .map(|count| Entry {
            label: format!("{count} Questions"),
            detail: String::new(),
        })
        .collect();

    let session = app.session();
    let subtitle = match (session.topic(), session.difficulty()) {
        (Some(topic), Some(difficulty)) => format!("{}  ·  {}", topic.name(), difficulty),
        _ => String::new(),
    };

    render_menu(
        frame,
        area,
        "HOW MANY CHALLENGES?",
        &subtitle,
        &entries,
        app.cursor(),
        "j/k navigate  ·  enter start  ·  esc back  ·  q quit",
    );
}

fn render_menu(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    entries: &[Entry],
    cursor: usize,
    controls: &str,
) {
    let chunks = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let header = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
        Line::from(subtitle.fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let mut lines: Vec<Line> = Vec::with_capacity(entries.len() * 2);
    for (index, entry) in entries.iter().enumerate() {
        let is_selected = index == cursor;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(entry.label.as_str(), style),
        ]));
        if !entry.detail.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("      {}", entry.detail),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, chunks[1]);

    frame.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .fg(Color::DarkGray),
        chunks[2],
    );
}
