pub mod dial;
pub mod status_bar;
pub mod theme;

use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;

/// Top-level draw function: dial ring above, key hints below
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let render = app.dial.frame(now);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    dial::render(f, app, &render, chunks[0]);
    status_bar::render(f, app, render.lifecycle, chunks[1]);
}
