mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::Screen;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Welcome => welcome::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Result => result::render(frame, area, app),
    }
}
