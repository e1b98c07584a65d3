use crate::app::{AppState, PanelKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let total = state.panel_lines.len();
    let offset = state.panel_offset(inner_height);

    let scroll_info = if total > inner_height {
        format!(
            " [{}-{}/{}]",
            offset + 1,
            (offset + inner_height).min(total),
            total,
        )
    } else {
        String::new()
    };

    let title = match state.panel_kind {
        PanelKind::Tail => format!(" Log{scroll_info} "),
        PanelKind::Report => format!(" Report{scroll_info} "),
    };

    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(" J/K scroll · l reload tail ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.panel_lines.is_empty() {
        let para =
            Paragraph::new("(no log output yet)").style(Style::default().fg(Color::DarkGray));
        f.render_widget(para, inner);
        return;
    }

    let visible: Vec<Line> = state
        .panel_lines
        .iter()
        .skip(offset)
        .take(inner_height)
        .map(|l| Line::from(Span::raw(l.as_str())))
        .collect();

    f.render_widget(Paragraph::new(visible), inner);
}
