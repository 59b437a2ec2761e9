use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::session::RenderResult;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_card(frame, chunks[1], result);
    render_controls(frame, chunks[3]);
}

fn render_score_card(frame: &mut Frame, area: Rect, result: &RenderResult) {
    let percentage = result.score as f64 * 100.0 / result.total as f64;
    let grade_color = grade_color(percentage);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", result.score, result.total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            result.message.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        100 => Color::Green,
        80..=99 => Color::Cyan,
        60..=79 => Color::Yellow,
        40..=59 => Color::Magenta,
        _ => Color::Red,
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
