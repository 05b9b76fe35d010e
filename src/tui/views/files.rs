use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::coordinator::Coordinator;
use crate::selection::Projection;
use crate::stats::{commit_lines, per_file_line_units};
use crate::tui::draw::language_color;
use crate::util::truncate;

const NAME_WIDTH: usize = 28;

/// One dot per line, grouped by file, largest files first.
pub fn draw_files_panel<P: Projection>(
    f: &mut Frame,
    area: Rect,
    coordinator: &Coordinator<P>,
    scroll: usize,
) {
    let languages = &coordinator.visible_stats().languages;
    let mut files = per_file_line_units(commit_lines(coordinator.visible_commits()));
    files.sort_by(|a, b| b.lines.len().cmp(&a.lines.len()));

    let dot_room = (area.width as usize).saturating_sub(NAME_WIDTH + 14);
    let total = files.len();
    let scroll = scroll.min(total.saturating_sub(1));

    let lines: Vec<Line> = files
        .iter()
        .skip(scroll)
        .map(|unit| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<width$}", truncate(unit.file, NAME_WIDTH), width = NAME_WIDTH),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>6} lines ", unit.lines.len()),
                    Style::default().fg(Color::Gray),
                ),
            ];
            spans.extend(unit.lines.iter().take(dot_room).map(|record| {
                let index = languages
                    .iter()
                    .position(|s| s.language == record.language)
                    .unwrap_or(0);
                Span::styled("•", Style::default().fg(language_color(index)))
            }));
            Line::from(spans)
        })
        .collect();

    let title = format!(" Files ({total}) ");
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}
