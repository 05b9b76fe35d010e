use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::{Frame, Terminal};
use tracing::{debug, info, warn};

use super::events::{cycle_focus, handle_key, handle_mouse, nearest_commit, Action, HOVER_DISTANCE};
use super::state::{Panel, TuiState};
use super::views::{
    draw_commit_detail, draw_files_panel, draw_help_overlay, draw_languages_panel, draw_scatter,
    draw_slider, draw_summary_panel,
};
use crate::chart::ChartProjection;
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::coordinator::{Coordinator, Event, Session};
use crate::error::LocError;
use crate::fetch::fetch_commits;
use crate::model::CommitSummary;

type Loaded = anyhow::Result<Vec<CommitSummary>>;

/// Run the terminal explorer until the user quits.
pub fn run(common: &CommonArgs) -> anyhow::Result<()> {
    let config = Config::load(common.config.as_deref()).context("Failed to load config")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, common, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn spawn_loader(path: PathBuf) -> Receiver<Loaded> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(fetch_commits(&path, false));
    });
    rx
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    common: &CommonArgs,
    config: &Config,
) -> anyhow::Result<()> {
    let mut session: Session<ChartProjection> = Session::Loading;
    let mut ui = TuiState::default();
    let mut loader = Some(spawn_loader(common.data.clone()));
    let tick = Duration::from_millis(config.explore.tick_ms);

    loop {
        if let Some(rx) = &loader {
            match rx.try_recv() {
                Ok(Ok(commits)) => {
                    let projection = ChartProjection::fit(&commits, &config.chart);
                    let position = common.position.unwrap_or(config.explore.initial_position);
                    let mut coordinator = Coordinator::new(commits, projection, position);
                    if common.region.is_some() {
                        coordinator.set_selection(common.region);
                    }
                    info!(commits = coordinator.commits().len(), "explorer ready");
                    session.ready(coordinator);
                    loader = None;
                }
                Ok(Err(e)) => {
                    warn!("load failed: {e:#}");
                    ui.load_error = Some(format!("{e:#}"));
                    loader = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    ui.load_error = Some("loader stopped before finishing".to_string());
                    loader = None;
                }
            }
        }

        if let Err(e) = terminal.draw(|f| draw_frame(f, &session, config, common, &mut ui)) {
            warn!("TUI draw error: {e}");
        }

        if !poll(tick)? {
            continue;
        }

        let position = session
            .coordinator()
            .map(|c| c.state().control_position)
            .unwrap_or(config.explore.initial_position);
        let action = match read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(key, &mut ui, position, config)
            }
            TermEvent::Mouse(mouse) => handle_mouse(mouse, &mut ui, position, config),
            _ => Action::None,
        };

        match action {
            Action::None => {}
            Action::Quit => break,
            Action::Dispatch(event) => dispatch(&mut session, event, &mut ui),
            Action::CopySelection => copy_selection(&session, &mut ui),
            Action::FocusNext => step_focus(&session, &mut ui, true),
            Action::FocusPrev => step_focus(&session, &mut ui, false),
            Action::Hover(point) => hover(&session, &mut ui, point),
        }
    }

    Ok(())
}

fn dispatch(session: &mut Session<ChartProjection>, event: Event, ui: &mut TuiState) {
    match session.dispatch(event) {
        Ok(view) => debug!(
            visible = view.visible.len(),
            selected = view.selected_ids.len(),
            "view updated"
        ),
        Err(LocError::NotLoaded) => ui.set_status("Still loading commits..."),
        Err(e) => ui.set_status(format!("Error: {e}")),
    }
}

fn step_focus(session: &Session<ChartProjection>, ui: &mut TuiState, forward: bool) {
    let Some(coordinator) = session.coordinator() else {
        return;
    };
    let view = coordinator.view_model();
    let ids: Vec<&str> = view.visible.iter().map(|c| c.id.as_str()).collect();
    ui.focused = cycle_focus(&ids, ui.focused.as_deref(), forward).map(str::to_string);
}

fn hover(session: &Session<ChartProjection>, ui: &mut TuiState, point: (f64, f64)) {
    let Some(coordinator) = session.coordinator() else {
        return;
    };
    let view = coordinator.view_model();
    if let Some(commit) = nearest_commit(&view.visible, coordinator.projection(), point, HOVER_DISTANCE) {
        ui.focused = Some(commit.id.clone());
    }
}

fn copy_selection(session: &Session<ChartProjection>, ui: &mut TuiState) {
    let Some(coordinator) = session.coordinator() else {
        ui.set_status("Still loading commits...");
        return;
    };
    let ids: Vec<&str> = coordinator.selected_commits().map(|c| c.id.as_str()).collect();
    if ids.is_empty() {
        ui.set_status("Nothing selected");
        return;
    }
    match copy_to_clipboard(&ids.join("\n")) {
        Ok(()) => ui.set_status(format!("Copied {} commit ids", ids.len())),
        Err(err) => ui.set_status(format!("Clipboard error: {err}")),
    }
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

fn draw_frame(
    f: &mut Frame,
    session: &Session<ChartProjection>,
    config: &Config,
    common: &CommonArgs,
    ui: &mut TuiState,
) {
    let size = f.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    match session.coordinator() {
        Some(coordinator) => draw_explorer(f, rows[0], rows[1], coordinator, config, ui),
        None => draw_loading(f, rows[1], common, ui),
    }

    let status = ui.current_status().map(str::to_string).unwrap_or_else(|| {
        "←/→ window · drag or b brush · n/p inspect · Tab panel · c copy · h help · q quit".to_string()
    });
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::Gray)),
        rows[2],
    );

    if ui.show_help {
        draw_help_overlay(f, size);
    }
}

fn draw_loading(f: &mut Frame, area: Rect, common: &CommonArgs, ui: &TuiState) {
    let (text, style) = match &ui.load_error {
        Some(err) => (format!("Failed to load: {err}"), Style::default().fg(Color::Red)),
        None => (
            format!("Loading {}...", common.data.display()),
            Style::default().fg(Color::Yellow),
        ),
    };
    let paragraph = Paragraph::new(Line::from(text))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" locscope "));
    f.render_widget(paragraph, area);
}

fn draw_explorer(
    f: &mut Frame,
    slider_area: Rect,
    body: Rect,
    coordinator: &Coordinator<ChartProjection>,
    config: &Config,
    ui: &mut TuiState,
) {
    let view = coordinator.view_model();
    draw_slider(f, slider_area, &view);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(body);

    let chart_column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(columns[0]);

    // Focus is dropped once the commit leaves the window.
    let focused = ui
        .focused
        .as_deref()
        .and_then(|id| view.visible.iter().copied().find(|c| c.id == id));

    ui.chart_area = Some(draw_scatter(
        f,
        chart_column[0],
        &view,
        coordinator.projection(),
        &config.chart,
        &ui.brush,
        focused.map(|c| c.id.as_str()),
    ));

    let projection = coordinator.projection();
    let readout = ui.readout_point().and_then(|(x, y)| {
        projection.time_at(x).map(|time| (time, projection.hour_at(y)))
    });
    draw_commit_detail(
        f,
        chart_column[1],
        focused,
        config.commit_url_base.as_deref(),
        readout,
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    let tabs = Tabs::new(Panel::ALL.iter().map(|p| p.title()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(ui.panel.index());
    f.render_widget(tabs, side[0]);

    match ui.panel {
        Panel::Summary => draw_summary_panel(f, side[1], &view),
        Panel::Languages => draw_languages_panel(f, side[1], &view),
        Panel::Files => draw_files_panel(f, side[1], coordinator, ui.file_scroll),
    }
}
