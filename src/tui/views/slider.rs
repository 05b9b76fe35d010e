use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;

use crate::coordinator::ViewModel;
use crate::window::MAX_POSITION;

pub fn draw_slider(f: &mut Frame, area: Rect, view: &ViewModel<'_>) {
    let ratio = (view.control_position / MAX_POSITION).clamp(0.0, 1.0);
    let label = match view.window_cutoff {
        Some(cutoff) => format!(
            "{:.0}%  ·  {}",
            view.control_position,
            cutoff.format("%Y-%m-%d %H:%M UTC")
        ),
        None => "no commits".to_string(),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Show commits until (←/→) "),
        )
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}
