use crate::app::{AppState, SkillStatus};
use crate::projector::{installs_label, SkillRow};
use crate::tui::text::{pad, pad_left};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const RANK_WIDTH: usize = 4;
const INSTALLS_WIDTH: usize = 12;
const BADGE_WIDTH: usize = 9;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Skills ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.rows.is_empty() {
        let msg = if state.is_loading {
            "Loading summary..."
        } else {
            "No skills loaded"
        };
        let para = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
        f.render_widget(para, inner);
        return;
    }

    let width = inner.width as usize;
    // rank + gap + name + gap + installs + gap + source + gap + badge
    let fixed = RANK_WIDTH + INSTALLS_WIDTH + BADGE_WIDTH + 4;
    let flexible = width.saturating_sub(fixed);
    let name_width = flexible * 3 / 5;
    let source_width = flexible.saturating_sub(name_width);

    let mut lines: Vec<Line> = vec![header_line(name_width, source_width)];

    // One line is spent on the column header
    let visible_height = (inner.height as usize).saturating_sub(1);
    let scroll_offset = if state.cursor >= visible_height && visible_height > 0 {
        state.cursor - visible_height + 1
    } else {
        0
    };

    for (i, row) in state
        .rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
    {
        lines.push(row_line(
            row,
            i == state.cursor,
            name_width,
            source_width,
        ));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn header_line(name_width: usize, source_width: usize) -> Line<'static> {
    let text = format!(
        "{} {} {} {} {}",
        pad_left("#", RANK_WIDTH),
        pad("Skill", name_width),
        pad_left("Installs", INSTALLS_WIDTH),
        pad("Source", source_width),
        pad("Status", BADGE_WIDTH),
    );
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    ))
}

fn row_line(
    row: &SkillRow,
    is_selected: bool,
    name_width: usize,
    source_width: usize,
) -> Line<'static> {
    let badge_style = match row.badge {
        SkillStatus::Installed => Style::default().fg(Color::Green),
        SkillStatus::Missing => Style::default().fg(Color::Red),
    };

    let mut spans = vec![
        Span::styled(
            pad_left(&row.rank.to_string(), RANK_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(
            pad(&row.name, name_width),
            Style::default().fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(
            pad_left(&installs_label(row.installs), INSTALLS_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(
            pad(&row.source, source_width),
            Style::default().fg(Color::Blue),
        ),
        Span::raw(" "),
        Span::styled(pad(row.badge.label(), BADGE_WIDTH), badge_style),
    ];

    if is_selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}
