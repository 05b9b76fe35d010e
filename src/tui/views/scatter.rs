use std::collections::HashSet;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::chart::{ChartProjection, DayPeriod, RadiusScale};
use crate::config::ChartConfig;
use crate::coordinator::ViewModel;
use crate::selection::Projection;
use crate::tui::draw::{period_color, FOCUSED_COLOR, SELECTED_COLOR};
use crate::tui::layout::inner;
use crate::tui::state::Brush;

const HOUR_TICKS: [f64; 5] = [0.0, 6.0, 12.0, 18.0, 24.0];

/// Commits by date (x) and time of day (y), sized by lines. Returns the canvas area.
pub fn draw_scatter(
    f: &mut Frame,
    area: Rect,
    view: &ViewModel<'_>,
    projection: &ChartProjection,
    chart: &ChartConfig,
    brush: &Brush,
    focused: Option<&str>,
) -> Rect {
    let width = chart.width;
    let height = chart.height;
    let usable = *projection.area();
    let radius = RadiusScale::fit(view.visible.iter().copied(), chart);
    let selected: HashSet<&str> = view.selected_ids.iter().copied().collect();

    let title = match view.window_cutoff {
        Some(cutoff) => format!(" Commits by time of day · up to {} ", cutoff.format("%Y-%m-%d %H:%M")),
        None => " Commits by time of day ".to_string(),
    };

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Canvas y grows upwards; chart y grows downwards.
            for hour in HOUR_TICKS {
                let y = height - projection.y_for(hour);
                ctx.draw(&CanvasLine {
                    x1: usable.left,
                    y1: y,
                    x2: usable.right,
                    y2: y,
                    color: Color::DarkGray,
                });
                ctx.print(
                    0.0,
                    y,
                    Span::styled(format!("{:02}:00", hour as u32), Style::default().fg(Color::Gray)),
                );
            }
            ctx.layer();

            for commit in &view.visible {
                let color = if focused == Some(commit.id.as_str()) {
                    FOCUSED_COLOR
                } else if selected.contains(commit.id.as_str()) {
                    SELECTED_COLOR
                } else {
                    period_color(DayPeriod::from_hour(commit.hour_frac))
                };
                ctx.draw(&Circle {
                    x: projection.x(commit),
                    y: height - projection.y(commit),
                    radius: radius.radius(commit.total_lines),
                    color,
                });
            }
            ctx.layer();

            if let Some(region) = view.selection {
                ctx.draw(&Rectangle {
                    x: region.x0,
                    y: height - region.y1,
                    width: region.width(),
                    height: region.height(),
                    color: Color::White,
                });
            }
            if brush.keyboard {
                let (x, y) = brush.cursor;
                ctx.draw(&Points {
                    coords: &[(x, height - y)],
                    color: Color::LightRed,
                });
            }
        });

    f.render_widget(canvas, area);
    inner(area)
}
