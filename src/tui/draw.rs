use ratatui::style::Color;

use crate::chart::DayPeriod;

const LANGUAGE_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Red,
    Color::LightGreen,
    Color::LightMagenta,
];

pub const SELECTED_COLOR: Color = Color::LightYellow;
pub const FOCUSED_COLOR: Color = Color::LightCyan;

/// Marker colour by time of day.
pub fn period_color(period: DayPeriod) -> Color {
    match period {
        DayPeriod::Night => Color::Indexed(18),
        DayPeriod::Morning => Color::Indexed(208),
        DayPeriod::Afternoon => Color::Indexed(39),
        DayPeriod::Evening => Color::Indexed(27),
    }
}

/// Stable colour for the `index`-th language in first-seen order.
pub fn language_color(index: usize) -> Color {
    LANGUAGE_COLORS[index % LANGUAGE_COLORS.len()]
}
