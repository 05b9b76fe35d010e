use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod detail;
mod files;
mod help;
mod languages;
mod scatter;
mod slider;
mod summary;

pub use detail::draw_commit_detail;
pub use files::draw_files_panel;
pub use help::draw_help_overlay;
pub use languages::draw_languages_panel;
pub use scatter::draw_scatter;
pub use slider::draw_slider;
pub use summary::draw_summary_panel;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
