use crate::app::{AppState, NARROW_WIDTH_THRESHOLD};
use crate::tui::{footer, header, log_panel, paths, skills};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Min(1),    // body
            Constraint::Length(3), // footer: status line + key hints
        ])
        .split(f.area());

    header::render(f, chunks[0], state);

    if f.area().width < NARROW_WIDTH_THRESHOLD {
        // Narrow terminal: stack the table over the panel, drop the paths box
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        skills::render(f, body[0], state);
        log_panel::render(f, body[1], state);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        skills::render(f, body[0], state);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(body[1]);
        paths::render(f, right[0], state);
        log_panel::render(f, right[1], state);
    }

    footer::render(f, chunks[2], state);
}
