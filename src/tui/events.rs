use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::layout::cell_to_chart;
use super::state::{Panel, TuiState};
use crate::config::{ChartConfig, Config};
use crate::coordinator::Event;
use crate::model::CommitSummary;
use crate::selection::Projection;
use crate::window::{MAX_POSITION, MIN_POSITION};

/// What the run loop should do after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    Dispatch(Event),
    CopySelection,
    FocusNext,
    FocusPrev,
    /// Pointer moved to this chart point.
    Hover((f64, f64)),
}

/// Hover reach in chart units around a marker centre.
pub const HOVER_DISTANCE: f64 = 20.0;

pub fn handle_key(key: KeyEvent, ui: &mut TuiState, position: f64, config: &Config) -> Action {
    if ui.show_help {
        if matches!(key.code, KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Esc) {
            ui.show_help = false;
        }
        return match key.code {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    if ui.brush.keyboard {
        return handle_brush_key(key, ui, &config.chart, config.explore.brush_step);
    }

    let step = config.explore.slider_step;
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('h') | KeyCode::F(1) => {
            ui.show_help = true;
            Action::None
        }
        KeyCode::Left => Action::Dispatch(Event::ControlChanged(position - step)),
        KeyCode::Right => Action::Dispatch(Event::ControlChanged(position + step)),
        KeyCode::Home => Action::Dispatch(Event::ControlChanged(MIN_POSITION)),
        KeyCode::End => Action::Dispatch(Event::ControlChanged(MAX_POSITION)),
        KeyCode::Tab => {
            ui.panel = ui.panel.next();
            Action::None
        }
        KeyCode::BackTab => {
            ui.panel = ui.panel.prev();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') if ui.panel == Panel::Files => {
            ui.file_scroll = ui.file_scroll.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') if ui.panel == Panel::Files => {
            ui.file_scroll = ui.file_scroll.saturating_add(1);
            Action::None
        }
        KeyCode::Char('b') => {
            ui.brush.reset();
            ui.brush.keyboard = true;
            ui.brush.cursor = (config.chart.width / 2.0, config.chart.height / 2.0);
            ui.set_status("Brush: arrows move, Space anchors, Enter keeps, Esc clears");
            Action::None
        }
        KeyCode::Char('c') => Action::CopySelection,
        KeyCode::Char('n') => Action::FocusNext,
        KeyCode::Char('p') => Action::FocusPrev,
        KeyCode::Esc => Action::Dispatch(Event::SelectionChanged(None)),
        _ => Action::None,
    }
}

fn handle_brush_key(key: KeyEvent, ui: &mut TuiState, chart: &ChartConfig, step: f64) -> Action {
    let dx = chart.width * step;
    let dy = chart.height * step;
    let (x, y) = ui.brush.cursor;
    let moved = match key.code {
        KeyCode::Left => Some((x - dx, y)),
        KeyCode::Right => Some((x + dx, y)),
        KeyCode::Up => Some((x, y - dy)),
        KeyCode::Down => Some((x, y + dy)),
        _ => None,
    };

    if let Some((nx, ny)) = moved {
        ui.brush.cursor = (nx.clamp(0.0, chart.width), ny.clamp(0.0, chart.height));
        return match ui.brush.region() {
            Some(region) => Action::Dispatch(Event::SelectionChanged(Some(region))),
            None => Action::None,
        };
    }

    match key.code {
        KeyCode::Char(' ') => {
            ui.brush.anchor = Some(ui.brush.cursor);
            Action::None
        }
        KeyCode::Enter | KeyCode::Char('b') => {
            ui.brush.reset();
            Action::None
        }
        KeyCode::Esc => {
            ui.brush.reset();
            Action::Dispatch(Event::SelectionChanged(None))
        }
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

pub fn handle_mouse(mouse: MouseEvent, ui: &mut TuiState, position: f64, config: &Config) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            Action::Dispatch(Event::ControlChanged(position + config.explore.slider_step))
        }
        MouseEventKind::ScrollDown => {
            Action::Dispatch(Event::ControlChanged(position - config.explore.slider_step))
        }
        _ if ui.show_help => Action::None,
        MouseEventKind::Moved if !ui.brush.dragging => {
            let point = ui
                .chart_area
                .and_then(|area| cell_to_chart(area, mouse.column, mouse.row, &config.chart));
            ui.pointer = point;
            point.map_or(Action::None, Action::Hover)
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = ui.chart_area else {
                return Action::None;
            };
            if let Some(point) = cell_to_chart(area, mouse.column, mouse.row, &config.chart) {
                ui.brush.reset();
                ui.brush.dragging = true;
                ui.brush.anchor = Some(point);
                ui.brush.cursor = point;
            }
            Action::None
        }
        MouseEventKind::Drag(MouseButton::Left) if ui.brush.dragging => {
            let Some(area) = ui.chart_area else {
                return Action::None;
            };
            let (column, row) = clamp_cell(area, mouse.column, mouse.row);
            if let Some(point) = cell_to_chart(area, column, row, &config.chart) {
                ui.brush.cursor = point;
            }
            match ui.brush.region() {
                Some(region) => Action::Dispatch(Event::SelectionChanged(Some(region))),
                None => Action::None,
            }
        }
        MouseEventKind::Up(MouseButton::Left) if ui.brush.dragging => {
            let clicked = ui.brush.anchor == Some(ui.brush.cursor);
            ui.brush.reset();
            if clicked {
                Action::Dispatch(Event::SelectionChanged(None))
            } else {
                Action::None
            }
        }
        _ => Action::None,
    }
}

fn clamp_cell(area: Rect, column: u16, row: u16) -> (u16, u16) {
    let max_col = area.x + area.width.saturating_sub(1);
    let max_row = area.y + area.height.saturating_sub(1);
    (column.clamp(area.x, max_col), row.clamp(area.y, max_row))
}

/// Next (or previous) id after `current` in `ids`, wrapping around. Starts at
/// the first (or last) id when `current` is absent or no longer listed.
pub fn cycle_focus<'a>(ids: &[&'a str], current: Option<&str>, forward: bool) -> Option<&'a str> {
    if ids.is_empty() {
        return None;
    }
    let len = ids.len();
    let next = match current.and_then(|id| ids.iter().position(|&c| c == id)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(ids[next])
}

/// Commit whose marker centre is closest to `point`, within `max_distance`.
pub fn nearest_commit<'a, P: Projection>(
    commits: &[&'a CommitSummary],
    projection: &P,
    point: (f64, f64),
    max_distance: f64,
) -> Option<&'a CommitSummary> {
    commits
        .iter()
        .map(|&c| {
            let dx = projection.x(c) - point.0;
            let dy = projection.y(c) - point.1;
            (c, dx.hypot(dy))
        })
        .filter(|(_, d)| *d <= max_distance)
        .fold(None, |best: Option<(&'a CommitSummary, f64)>, (c, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((c, d)),
        })
        .map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::chart::ChartProjection;
    use crate::load::read_csv;
    use crate::selection::Region;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrows_move_the_slider() {
        let mut ui = TuiState::default();
        let config = Config::default();
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut ui, 50.0, &config),
            Action::Dispatch(Event::ControlChanged(49.0))
        );
        assert_eq!(
            handle_key(key(KeyCode::End), &mut ui, 50.0, &config),
            Action::Dispatch(Event::ControlChanged(100.0))
        );
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut ui = TuiState::default();
        let config = Config::default();
        handle_key(key(KeyCode::Char('h')), &mut ui, 100.0, &config);
        assert!(ui.show_help);
        assert_eq!(handle_key(key(KeyCode::Left), &mut ui, 100.0, &config), Action::None);
        handle_key(key(KeyCode::Esc), &mut ui, 100.0, &config);
        assert!(!ui.show_help);
    }

    #[test]
    fn keyboard_brush_emits_region_after_anchor() {
        let mut ui = TuiState::default();
        let config = Config::default();
        handle_key(key(KeyCode::Char('b')), &mut ui, 100.0, &config);
        assert!(ui.brush.keyboard);
        assert_eq!(ui.brush.cursor, (500.0, 300.0));

        // Moving before anchoring selects nothing.
        assert_eq!(handle_key(key(KeyCode::Right), &mut ui, 100.0, &config), Action::None);
        handle_key(key(KeyCode::Char(' ')), &mut ui, 100.0, &config);
        let action = handle_key(key(KeyCode::Down), &mut ui, 100.0, &config);
        assert_eq!(
            action,
            Action::Dispatch(Event::SelectionChanged(Some(Region::new(
                (520.0, 300.0),
                (520.0, 312.0)
            ))))
        );

        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut ui, 100.0, &config),
            Action::Dispatch(Event::SelectionChanged(None))
        );
        assert!(!ui.brush.keyboard);
    }

    #[test]
    fn mouse_drag_builds_region_and_click_clears() {
        let mut ui = TuiState {
            chart_area: Some(Rect::new(0, 0, 100, 60)),
            ..TuiState::default()
        };
        let config = Config::default();

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), &mut ui, 100.0, &config);
        let action = handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 20), &mut ui, 100.0, &config);
        assert_eq!(
            action,
            Action::Dispatch(Event::SelectionChanged(Some(Region::new(
                (105.0, 105.0),
                (205.0, 205.0)
            ))))
        );
        assert_eq!(
            handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20, 20), &mut ui, 100.0, &config),
            Action::None
        );

        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 30), &mut ui, 100.0, &config);
        assert_eq!(
            handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30, 30), &mut ui, 100.0, &config),
            Action::Dispatch(Event::SelectionChanged(None))
        );
    }

    #[test]
    fn drag_outside_chart_clamps_to_edge() {
        let mut ui = TuiState {
            chart_area: Some(Rect::new(0, 0, 100, 60)),
            ..TuiState::default()
        };
        let config = Config::default();
        handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, 30), &mut ui, 100.0, &config);
        handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 150, 90), &mut ui, 100.0, &config);
        assert_eq!(ui.brush.cursor, (995.0, 595.0));
    }

    const DATA: &str = "commit,file,line,depth,length,type,author,datetime
aaaaaaaaaaaa,a.rs,1,0,4,Rust,alice,2024-01-01T09:00:00Z
bbbbbbbbbbbb,b.rs,1,0,4,Rust,bob,2024-01-02T14:30:00Z
cccccccccccc,c.rs,1,0,4,Rust,carol,2024-01-03T22:00:00Z
";

    #[test]
    fn focus_cycles_through_visible_ids() {
        let ids = ["a", "b", "c"];
        assert_eq!(cycle_focus(&ids, None, true), Some("a"));
        assert_eq!(cycle_focus(&ids, None, false), Some("c"));
        assert_eq!(cycle_focus(&ids, Some("c"), true), Some("a"));
        assert_eq!(cycle_focus(&ids, Some("a"), false), Some("c"));
        // A commit that left the window restarts the cycle.
        assert_eq!(cycle_focus(&ids, Some("gone"), true), Some("a"));
        assert_eq!(cycle_focus(&[], Some("a"), true), None);
    }

    #[test]
    fn focus_keys_map_to_actions() {
        let mut ui = TuiState::default();
        let config = Config::default();
        assert_eq!(handle_key(key(KeyCode::Char('n')), &mut ui, 100.0, &config), Action::FocusNext);
        assert_eq!(handle_key(key(KeyCode::Char('p')), &mut ui, 100.0, &config), Action::FocusPrev);
    }

    #[test]
    fn hover_picks_nearest_marker_in_reach() {
        let commits = aggregate_commits(read_csv(DATA.as_bytes()).unwrap());
        let projection = ChartProjection::fit(&commits, &ChartConfig::default());
        let refs: Vec<&CommitSummary> = commits.iter().collect();

        // Markers sit at (20, 360), (505, ~231.7) and (990, ~56.7).
        let hit = nearest_commit(&refs, &projection, (500.0, 240.0), HOVER_DISTANCE);
        assert_eq!(hit.map(|c| c.id.as_str()), Some("bbbbbbbbbbbb"));
        let hit = nearest_commit(&refs, &projection, (30.0, 350.0), HOVER_DISTANCE);
        assert_eq!(hit.map(|c| c.id.as_str()), Some("aaaaaaaaaaaa"));
        assert!(nearest_commit(&refs, &projection, (700.0, 500.0), HOVER_DISTANCE).is_none());
    }

    #[test]
    fn mouse_move_over_chart_reports_hover() {
        let mut ui = TuiState {
            chart_area: Some(Rect::new(0, 0, 100, 60)),
            ..TuiState::default()
        };
        let config = Config::default();
        assert_eq!(
            handle_mouse(mouse(MouseEventKind::Moved, 50, 23), &mut ui, 100.0, &config),
            Action::Hover((505.0, 235.0))
        );
        assert_eq!(ui.pointer, Some((505.0, 235.0)));
        assert_eq!(
            handle_mouse(mouse(MouseEventKind::Moved, 150, 23), &mut ui, 100.0, &config),
            Action::None
        );
        assert_eq!(ui.pointer, None);
    }
}
