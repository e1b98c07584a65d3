use crate::app::AppState;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const SPINNER_FRAMES: &[char] = &['⠁', '⠃', '⠇', '⠧', '⠷', '⠿', '⠷', '⠧', '⠇', '⠃'];

pub fn spinner_frame(idx: usize) -> char {
    SPINNER_FRAMES[idx % SPINNER_FRAMES.len()]
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            format!(" skw v{} ", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            &state.config.base_url,
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" [{} · top {}]", state.view.as_str(), state.limit),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if let Some(summary) = &state.summary {
        let counts = &summary.counts;
        spans.push(Span::styled(
            format!(
                "  {} installed · {} of top installed · {} missing",
                counts.installed_total, counts.installed_top, counts.missing_top
            ),
            Style::default().fg(Color::Green),
        ));
    }

    if state.is_loading {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner_frame(state.spinner_frame).to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    if state.error_message().is_some() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }

    #[test]
    fn spinner_large_index_no_panic() {
        let _ = spinner_frame(usize::MAX);
    }
}
