use crate::error::{LocError, Result};
use crate::model::CommitSummary;
use crate::selection::{select_indices, Projection, Region};
use crate::stats::ScopeStats;
use crate::window::{clamp_position, TimeWindow, MAX_POSITION};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    ControlChanged(f64),
    SelectionChanged(Option<Region>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionState {
    pub control_position: f64,
    pub window_cutoff: Option<DateTime<Utc>>,
    pub selection: Option<Region>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub window: u64,
    pub selection: u64,
}

/// Everything the rendering surface needs after one recomputation.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel<'a> {
    pub control_position: f64,
    pub window_cutoff: Option<DateTime<Utc>>,
    pub selection: Option<Region>,
    /// Descending by line count so small markers draw over large ones.
    pub visible: Vec<&'a CommitSummary>,
    pub selected_ids: Vec<&'a str>,
    pub visible_stats: &'a ScopeStats,
    pub selected_stats: &'a ScopeStats,
    pub revision: Revision,
}

pub struct Coordinator<P> {
    commits: Vec<CommitSummary>,
    window: TimeWindow,
    projection: P,
    state: InteractionState,
    visible: Vec<usize>,
    selected: Vec<usize>,
    visible_stats: ScopeStats,
    selected_stats: ScopeStats,
    revision: Revision,
}

impl<P: Projection> Coordinator<P> {
    pub fn new(commits: Vec<CommitSummary>, projection: P, initial_position: f64) -> Self {
        let window = TimeWindow::new(&commits);
        let mut coordinator = Self {
            commits,
            window,
            projection,
            state: InteractionState {
                control_position: MAX_POSITION,
                window_cutoff: None,
                selection: None,
            },
            visible: Vec::new(),
            selected: Vec::new(),
            visible_stats: ScopeStats::default(),
            selected_stats: ScopeStats::default(),
            revision: Revision::default(),
        };
        let initial = if initial_position.is_nan() {
            MAX_POSITION
        } else {
            initial_position
        };
        coordinator.apply_control(initial);
        coordinator
    }

    pub fn handle(&mut self, event: Event) -> ViewModel<'_> {
        match event {
            Event::ControlChanged(p) => self.set_control_position(p),
            Event::SelectionChanged(region) => self.set_selection(region),
        }
    }

    pub fn set_control_position(&mut self, position: f64) -> ViewModel<'_> {
        if position.is_nan() {
            warn!("ignoring NaN control position");
        } else {
            self.apply_control(position);
        }
        self.view_model()
    }

    pub fn set_selection(&mut self, region: Option<Region>) -> ViewModel<'_> {
        self.state.selection = region;
        self.reselect();
        self.view_model()
    }

    fn apply_control(&mut self, position: f64) {
        let p = clamp_position(position);
        self.state.control_position = p;
        self.state.window_cutoff = self.window.cutoff(p);
        self.visible = self.window.visible(&self.commits, p);
        self.visible_stats = ScopeStats::from_commits(self.visible.iter().map(|&i| &self.commits[i]));
        self.revision.window += 1;
        debug!(
            position = p,
            visible = self.visible.len(),
            "window recomputed"
        );
        self.reselect();
    }

    fn reselect(&mut self) {
        self.selected = select_indices(
            self.state.selection.as_ref(),
            &self.commits,
            &self.visible,
            &self.projection,
        );
        self.selected_stats =
            ScopeStats::from_commits(self.selected.iter().map(|&i| &self.commits[i]));
        self.revision.selection += 1;
        debug!(selected = self.selected.len(), "selection recomputed");
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        let mut visible: Vec<&CommitSummary> = self.visible_commits().collect();
        visible.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

        ViewModel {
            control_position: self.state.control_position,
            window_cutoff: self.state.window_cutoff,
            selection: self.state.selection,
            visible,
            selected_ids: self.selected_commits().map(|c| c.id.as_str()).collect(),
            visible_stats: &self.visible_stats,
            selected_stats: &self.selected_stats,
            revision: self.revision,
        }
    }

    pub fn commits(&self) -> &[CommitSummary] {
        &self.commits
    }

    pub fn visible_commits(&self) -> impl Iterator<Item = &CommitSummary> + '_ {
        self.visible.iter().map(move |&i| &self.commits[i])
    }

    pub fn selected_commits(&self) -> impl Iterator<Item = &CommitSummary> + '_ {
        self.selected.iter().map(move |&i| &self.commits[i])
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    pub fn visible_stats(&self) -> &ScopeStats {
        &self.visible_stats
    }

    pub fn selected_stats(&self) -> &ScopeStats {
        &self.selected_stats
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }
}

/// Gate that rejects interaction until the dataset is ready.
pub enum Session<P> {
    Loading,
    Ready(Box<Coordinator<P>>),
}

impl<P: Projection> Session<P> {
    pub fn ready(&mut self, coordinator: Coordinator<P>) {
        *self = Session::Ready(Box::new(coordinator));
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Session::Ready(_))
    }

    pub fn coordinator(&self) -> Option<&Coordinator<P>> {
        match self {
            Session::Ready(c) => Some(c.as_ref()),
            Session::Loading => None,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Result<ViewModel<'_>> {
        match self {
            Session::Ready(c) => Ok(c.handle(event)),
            Session::Loading => Err(LocError::NotLoaded),
        }
    }
}
