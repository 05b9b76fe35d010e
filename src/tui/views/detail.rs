use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::CommitSummary;

pub fn draw_commit_detail(
    f: &mut Frame,
    area: Rect,
    commit: Option<&CommitSummary>,
    url_base: Option<&str>,
    readout: Option<(DateTime<Utc>, f64)>,
) {
    let focus_line = match commit {
        Some(c) => {
            let mut spans = vec![
                Span::styled(
                    c.short_id().to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {}", c.timestamp.format("%a %Y-%m-%d %H:%M %:z"))),
                Span::styled(format!("  {}", c.author), Style::default().fg(Color::Cyan)),
                Span::styled(format!("  {} lines", c.total_lines), Style::default().fg(Color::Green)),
            ];
            if let Some(base) = url_base {
                spans.push(Span::styled(
                    format!("  {}", c.url(base)),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Hover a marker or press n/p to inspect a commit",
            Style::default().fg(Color::Gray),
        )),
    };

    let readout_line = match readout {
        Some((time, hour)) => Line::from(vec![
            Span::styled("pointer ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}  {}", time.format("%Y-%m-%d %H:%M UTC"), clock(hour))),
        ]),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![focus_line, readout_line])
        .block(Block::default().borders(Borders::ALL).title(" Commit "));
    f.render_widget(paragraph, area);
}

fn clock(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_rounds_to_minutes() {
        assert_eq!(clock(13.75), "13:45");
        assert_eq!(clock(0.0), "00:00");
        assert_eq!(clock(9.999), "10:00");
    }
}
