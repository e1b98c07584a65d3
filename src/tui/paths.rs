use crate::app::AppState;
use crate::tui::text::truncate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Skill paths ")
        .title_bottom(Line::from(" c/C copy ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = (inner.width as usize).saturating_sub(8);
    let lines = vec![
        path_line("custom", state.paths.custom.as_deref(), width),
        path_line("shared", state.paths.shared.as_deref(), width),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn path_line(label: &'static str, value: Option<&str>, width: usize) -> Line<'static> {
    let value_span = match value {
        Some(path) => Span::styled(truncate(path, width), Style::default().fg(Color::White)),
        None => Span::styled("-", Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![
        Span::styled(format!("{label}  "), Style::default().fg(Color::Yellow)),
        value_span,
    ])
}
