use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::ChartConfig;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Area inside a bordered block.
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Chart coordinates at the centre of a terminal cell, or `None` outside `area`.
pub fn cell_to_chart(area: Rect, column: u16, row: u16, chart: &ChartConfig) -> Option<(f64, f64)> {
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let fx = (column - area.x) as f64 + 0.5;
    let fy = (row - area.y) as f64 + 0.5;
    Some((
        fx * chart.width / area.width as f64,
        fy * chart.height / area.height as f64,
    ))
}
