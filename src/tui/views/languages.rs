use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::header_cell;
use crate::coordinator::ViewModel;
use crate::stats::CategoryShare;
use crate::tui::draw::language_color;
use crate::util::{format_percent, selection_label};

const BAR_WIDTH: usize = 20;

/// Language shares of the selection (top) and of the visible window (bottom).
pub fn draw_languages_panel(f: &mut Frame, area: Rect, view: &ViewModel<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let visible = &view.visible_stats.languages;
    let selected_title = format!(" {} ", selection_label(view.selected_stats.commits));
    f.render_widget(
        share_table(&view.selected_stats.languages, visible, selected_title),
        chunks[0],
    );
    f.render_widget(share_table(visible, visible, " Visible window ".to_string()), chunks[1]);
}

/// Colours follow the language's position in `palette_order` so both tables agree.
fn share_table<'a>(
    shares: &'a [CategoryShare],
    palette_order: &[CategoryShare],
    title: String,
) -> Table<'a> {
    let rows: Vec<Row> = shares
        .iter()
        .map(|share| {
            let index = palette_order
                .iter()
                .position(|s| s.language == share.language)
                .unwrap_or(0);
            let filled = (share.proportion * BAR_WIDTH as f64).round() as usize;
            Row::new(vec![
                Cell::from(share.language.as_str()),
                Cell::from(share.count.to_string()),
                Cell::from(format_percent(share.proportion)),
                Cell::from("█".repeat(filled)).style(Style::default().fg(language_color(index))),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Min(BAR_WIDTH as u16),
        ],
    )
    .header(Row::new(vec![
        header_cell("Language", Color::Yellow),
        header_cell("Lines", Color::Yellow),
        header_cell("Share", Color::Yellow),
        header_cell("", Color::Yellow),
    ]))
    .block(Block::default().borders(Borders::ALL).title(title))
}
