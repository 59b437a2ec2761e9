use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::{FeedbackState, RenderFeedback, RenderQuestion};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], question);
    render_progress(frame, chunks[1], question);
    render_prompt(frame, chunks[2], &question.prompt);
    render_choices(frame, chunks[3], question, app.feedback(), app.cursor());
    render_controls(frame, chunks[4], app.feedback().is_some());
}

fn render_header(frame: &mut Frame, area: Rect, question: &RenderQuestion) {
    let header = format!(
        "{}/{}",
        question.question_number, question.total_questions
    );
    let widget = Paragraph::new(header)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, question: &RenderQuestion) {
    // Completed questions, so the bar is empty at question 1 and never
    // full while a question is still on screen.
    let widget = Gauge::default()
        .ratio(question.progress_percent / 100.0)
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .label(format!("{:.0}%", question.progress_percent));
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(
    frame: &mut Frame,
    area: Rect,
    question: &RenderQuestion,
    feedback: Option<&RenderFeedback>,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.choice_labels.len() * 2);

    for (index, label) in question.choice_labels.iter().enumerate() {
        let (marker, style) = match feedback {
            Some(feedback) => feedback_style(feedback.choices[index].state),
            None => cursor_style(index == cursor),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", choice_letter(index)), style),
            Span::styled(label.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn feedback_style(state: FeedbackState) -> (&'static str, Style) {
    match state {
        FeedbackState::Correct => ("+", Style::default().fg(Color::Green).bold()),
        FeedbackState::IncorrectSelected => ("x", Style::default().fg(Color::Red).bold()),
        FeedbackState::Neutral => (" ", Style::default().fg(Color::DarkGray)),
    }
}

fn cursor_style(is_selected: bool) -> (&'static str, Style) {
    if is_selected {
        (">", Style::default().fg(Color::Cyan).bold())
    } else {
        (" ", Style::default().fg(Color::Gray))
    }
}

fn choice_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

fn render_controls(frame: &mut Frame, area: Rect, showing_feedback: bool) {
    let text = if showing_feedback {
        "next question in a moment..."
    } else {
        "j/k navigate  ·  enter select  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
