use crate::model::CommitSummary;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const MIN_POSITION: f64 = 0.0;
pub const MAX_POSITION: f64 = 100.0;

/// Linear map between the commit time extent and `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeScale {
    pub fn fit(commits: &[CommitSummary]) -> Option<Self> {
        let start = commits.iter().map(CommitSummary::utc).min()?;
        let end = commits.iter().map(CommitSummary::utc).max()?;
        Some(Self { start, end })
    }

    /// Timestamp at control position `p`. The ends of the range map exactly
    /// onto the domain bounds.
    pub fn invert(&self, position: f64) -> DateTime<Utc> {
        let p = clamp_position(position);
        if p >= MAX_POSITION {
            return self.end;
        }
        if p <= MIN_POSITION {
            return self.start;
        }
        interpolate(self.start, self.end, p / MAX_POSITION)
    }
}

fn nanos(delta: Duration) -> f64 {
    delta
        .num_nanoseconds()
        .map_or(delta.num_milliseconds() as f64 * 1e6, |n| n as f64)
}

/// How far `timestamp` lies from `start` towards `end`; `None` when they coincide.
pub(crate) fn fraction_of(start: DateTime<Utc>, end: DateTime<Utc>, timestamp: DateTime<Utc>) -> Option<f64> {
    if start == end {
        return None;
    }
    Some(nanos(timestamp - start) / nanos(end - start))
}

pub(crate) fn interpolate(start: DateTime<Utc>, end: DateTime<Utc>, t: f64) -> DateTime<Utc> {
    let offset = (nanos(end - start) * t) as i64;
    start
        .checked_add_signed(Duration::nanoseconds(offset))
        .unwrap_or(end)
}

/// Clamp into `[0, 100]`. NaN is passed through for callers to reject.
pub fn clamp_position(position: f64) -> f64 {
    position.clamp(MIN_POSITION, MAX_POSITION)
}

/// Indices of commits at or before `cutoff`, in input order.
pub fn visible_indices(commits: &[CommitSummary], cutoff: DateTime<Utc>) -> Vec<usize> {
    commits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.utc() <= cutoff)
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone)]
pub struct TimeWindow {
    scale: Option<TimeScale>,
}

impl TimeWindow {
    pub fn new(commits: &[CommitSummary]) -> Self {
        Self {
            scale: TimeScale::fit(commits),
        }
    }

    pub fn cutoff(&self, position: f64) -> Option<DateTime<Utc>> {
        self.scale.map(|s| s.invert(position))
    }

    pub fn visible(&self, commits: &[CommitSummary], position: f64) -> Vec<usize> {
        match self.cutoff(position) {
            Some(cutoff) => visible_indices(commits, cutoff),
            None => Vec::new(),
        }
    }
}
