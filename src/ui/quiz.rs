use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{OPTION_COUNT, Question};
use crate::session::{Feedback, QuizArena};

pub(super) const OPTION_LABELS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(arena) = app.arena() else {
        return;
    };
    let question = arena.current_question();
    let feedback = arena.feedback();

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
    ];
    if question.code.is_some() {
        constraints.push(Constraint::Min(6));
    }
    constraints.push(Constraint::Length(10));
    if feedback.is_some() {
        constraints.push(Constraint::Min(4));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).margin(1).split(area);
    let mut next = 0;
    let mut take = || {
        let chunk = chunks[next];
        next += 1;
        chunk
    };

    render_progress(frame, take(), take(), app, arena);
    render_question_text(frame, take(), &question.text);
    if let Some(code) = question.code.as_deref() {
        render_code_block(frame, take(), code);
    }
    render_options(frame, take(), question, arena.selected_option(), feedback);
    if let Some(feedback) = feedback {
        render_explanation(frame, take(), question, feedback);
    }
    render_controls(frame, take(), arena);
}

fn render_progress(
    frame: &mut Frame,
    label_area: Rect,
    bar_area: Rect,
    app: &App,
    arena: &QuizArena,
) {
    let topic = app.session().topic().map_or("", |topic| topic.name());
    let label = Line::from(vec![
        Span::styled(topic, Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(
                "   Challenge {} / {}",
                arena.current_question_number(),
                arena.total_questions()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(label), label_area);

    let bar = Gauge::default()
        .ratio(arena.progress().clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
    frame.render_widget(bar, bar_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_code_block(frame: &mut Frame, area: Rect, code: &str) {
    let code_lines: Vec<Line> = code
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Yellow))))
        .collect();

    let widget = Paragraph::new(code_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Code ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn option_style(index: usize, selected: Option<usize>, feedback: Option<Feedback>) -> Style {
    match feedback {
        Some(f) if index == f.correct_answer => Style::default().fg(Color::Green).bold(),
        Some(f) if index == f.chosen => Style::default().fg(Color::Red).bold(),
        Some(_) => Style::default().fg(Color::DarkGray),
        None if selected == Some(index) => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: Option<usize>,
    feedback: Option<Feedback>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(OPTION_COUNT * 2);

    for (index, option) in question.options.iter().enumerate() {
        let style = option_style(index, selected, feedback);
        let marker = match feedback {
            Some(f) if index == f.correct_answer => "+",
            Some(f) if index == f.chosen => "x",
            _ if selected == Some(index) => ">",
            _ => " ",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_explanation(frame: &mut Frame, area: Rect, question: &Question, feedback: Feedback) {
    let (verdict, color) = if feedback.is_correct {
        ("Correct!".to_string(), Color::Green)
    } else {
        (
            format!(
                "Not quite. The answer is {}.",
                OPTION_LABELS[question.correct_answer]
            ),
            Color::Red,
        )
    };

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(Span::styled(
            question.explanation.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, arena: &QuizArena) {
    let action = if !arena.is_revealed() {
        "enter submit answer"
    } else if arena.is_last_question() {
        "enter finish results"
    } else {
        "enter next question"
    };
    let widget = Paragraph::new(format!(
        "j/k or a-d choose  ·  {action}  ·  esc exit  ·  q quit"
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
