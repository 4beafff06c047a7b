use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::{AnswerReview, Grade, QuizResults, review};

use super::quiz::OPTION_LABELS;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let Some(results) = session.results() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let topic = session.topic().map_or("", |topic| topic.name());
    render_score_summary(frame, chunks[1], results, topic);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => Color::Yellow,
        Grade::Good => Color::Cyan,
        Grade::KeepLearning => Color::LightRed,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: QuizResults, topic: &str) {
    let color = grade_color(results.grade);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            results.grade.title(),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!("You've completed the {topic} quiz challenge."),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)",
                results.score, results.total, results.percentage
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let lines: Vec<Line> = review(session.questions(), session.user_answers())
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (symbol, color) = if row.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {symbol} "), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&row.question.text),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  {}", answer_summary(&row)),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((u16::try_from(app.cursor()).unwrap_or(u16::MAX), 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

fn answer_summary(row: &AnswerReview<'_>) -> String {
    let label = |index: usize| OPTION_LABELS.get(index).copied().unwrap_or('?');
    if row.is_correct {
        format!("you {}", label(row.chosen))
    } else {
        format!(
            "you {} · answer {}",
            label(row.chosen),
            label(row.question.correct_answer)
        )
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retake quiz  ·  n another language  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
