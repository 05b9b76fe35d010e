use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::selection::Region;

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Summary,
    Languages,
    Files,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Summary, Panel::Languages, Panel::Files];

    pub fn index(self) -> usize {
        match self {
            Panel::Summary => 0,
            Panel::Languages => 1,
            Panel::Files => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Panel::Summary => "Summary",
            Panel::Languages => "Languages",
            Panel::Files => "Files",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Rectangle being drawn, in chart coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Brush {
    /// Keyboard brushing active.
    pub keyboard: bool,
    /// Mouse button held.
    pub dragging: bool,
    pub anchor: Option<(f64, f64)>,
    pub cursor: (f64, f64),
}

impl Brush {
    pub fn region(&self) -> Option<Region> {
        self.anchor.map(|a| Region::new(a, self.cursor))
    }

    pub fn reset(&mut self) {
        *self = Brush::default();
    }
}

pub struct TuiState {
    pub panel: Panel,
    pub show_help: bool,
    pub brush: Brush,
    /// Inner canvas area from the last draw; used to map mouse cells to chart space.
    pub chart_area: Option<Rect>,
    pub file_scroll: usize,
    /// Commit shown in the detail bar.
    pub focused: Option<String>,
    /// Last hovered point in chart coordinates.
    pub pointer: Option<(f64, f64)>,
    pub load_error: Option<String>,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Chart point to read out: the keyboard brush cursor, else the mouse.
    pub fn readout_point(&self) -> Option<(f64, f64)> {
        if self.brush.keyboard || self.brush.dragging {
            Some(self.brush.cursor)
        } else {
            self.pointer
        }
    }

    pub fn current_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            panel: Panel::Summary,
            show_help: false,
            brush: Brush::default(),
            chart_area: None,
            file_scroll: 0,
            focused: None,
            pointer: None,
            load_error: None,
            status_message: None,
        }
    }
}
