use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing the slider, brushing, and panels.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locscope - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        heading("Time window:"),
        Line::from("  ←/→         Move the cutoff by one step"),
        Line::from("  Home/End    Earliest / latest commit"),
        Line::from("  Mouse wheel Move the cutoff"),
        Line::from(""),
        heading("Selection:"),
        Line::from("  Mouse drag  Brush a rectangle on the chart"),
        Line::from("  Click       Clear the selection"),
        Line::from("  b           Keyboard brush (arrows, Space anchors, Enter keeps)"),
        Line::from("  Esc         Clear the selection"),
        Line::from("  c           Copy selected commit ids"),
        Line::from(""),
        heading("Commit details:"),
        Line::from("  Hover       Inspect the marker under the pointer"),
        Line::from("  n / p       Next / previous visible commit"),
        Line::from(""),
        heading("Panels:"),
        Line::from("  Tab         Next panel (Summary/Languages/Files)"),
        Line::from("  Shift+Tab   Previous panel"),
        Line::from("  j/k or ↑/↓  Scroll the file list"),
        Line::from(""),
        heading("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
