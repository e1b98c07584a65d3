use crate::app::{AppState, NARROW_WIDTH_THRESHOLD};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let narrow = area.width < NARROW_WIDTH_THRESHOLD;

    let status_line = if let Some(err) = state.error_message() {
        Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::styled(err.to_owned(), Style::default().fg(Color::Red)),
            Span::styled(" (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
        ])
    } else if state.status.is_empty() {
        Line::from(Span::styled(
            "idle",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Yellow)),
            Span::styled(state.status.clone(), Style::default().fg(Color::Yellow)),
        ])
    };

    let hints: &[(&str, &str)] = if narrow {
        &[
            ("s", "sync"),
            ("f", "force"),
            ("p", "report"),
            ("r", "reload"),
            ("q", "quit"),
        ]
    } else {
        &[
            ("s", "sync"),
            ("f", "force refresh"),
            ("p", "report"),
            ("r", "reload summary"),
            ("l", "tail log"),
            ("v", "view"),
            ("+/-", "limit"),
            ("c/C", "copy path"),
            ("q", "quit"),
        ]
    };

    let mut hint_spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            hint_spans.push(Span::raw("  "));
        }
        hint_spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        hint_spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let footer = Paragraph::new(vec![status_line, Line::from(hint_spans)]).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}
