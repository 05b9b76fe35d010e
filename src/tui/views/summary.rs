use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::chart::DayPeriod;
use crate::coordinator::ViewModel;
use crate::stats::ScopeStats;
use crate::tui::draw::{period_color, SELECTED_COLOR};
use crate::util::selection_label;

pub fn draw_summary_panel(f: &mut Frame, area: Rect, view: &ViewModel<'_>) {
    let mut lines = vec![section("Visible window", Color::Yellow)];
    lines.extend(stat_lines(view.visible_stats));
    lines.push(Line::from(""));

    lines.push(section(&selection_label(view.selected_stats.commits), SELECTED_COLOR));
    if !view.selected_stats.is_empty() {
        lines.extend(stat_lines(view.selected_stats));
    }
    lines.push(Line::from(""));

    lines.push(section("Time of day", Color::Green));
    lines.push(Line::from(
        [
            DayPeriod::Night,
            DayPeriod::Morning,
            DayPeriod::Afternoon,
            DayPeriod::Evening,
        ]
        .into_iter()
        .flat_map(|p| {
            [
                Span::styled("● ", Style::default().fg(period_color(p))),
                Span::raw(format!("{}  ", p.label())),
            ]
        })
        .collect::<Vec<_>>(),
    ));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(paragraph, area);
}

fn section(title: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn stat_lines(stats: &ScopeStats) -> Vec<Line<'static>> {
    [
        ("Total LOC", stats.total_lines.to_string()),
        ("Commits", stats.commits.to_string()),
        ("Files", stats.files.to_string()),
        ("Max depth", stats.max_depth.to_string()),
        ("Longest line", stats.max_line_length.to_string()),
        ("Max lines", stats.max_lines_in_file.to_string()),
    ]
    .into_iter()
    .map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("  {label:<13}"), Style::default().fg(Color::White)),
            Span::styled(value, Style::default().fg(Color::Cyan)),
        ])
    })
    .collect()
}
