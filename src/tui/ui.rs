use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::AppState;
use crate::tui::components::{chart, cost, crons, sessions, status_bar};

pub fn draw(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Cost + chart
            Constraint::Min(5),    // Sessions
            Constraint::Length(8), // Schedule
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(chunks[0]);

    cost::render(frame, top[0], state);
    chart::render(frame, top[1], state);
    sessions::render(frame, chunks[1], state);
    crons::render(frame, chunks[2], state);
    status_bar::render(frame, chunks[3], state);
}
