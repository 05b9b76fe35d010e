use crate::config::ChartConfig;
use crate::model::CommitSummary;
use crate::selection::Projection;
use crate::window::{fraction_of, interpolate};
use chrono::{DateTime, Utc};

pub const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsableArea {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl UsableArea {
    pub fn from_config(chart: &ChartConfig) -> Self {
        Self {
            top: chart.margin_top,
            right: chart.width - chart.margin_right,
            bottom: chart.height - chart.margin_bottom,
            left: chart.margin_left,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Time on x over the full commit extent, hour of day on y (midnight at the bottom).
#[derive(Debug, Clone)]
pub struct ChartProjection {
    area: UsableArea,
    domain: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl ChartProjection {
    pub fn fit(commits: &[CommitSummary], chart: &ChartConfig) -> Self {
        let start = commits.iter().map(CommitSummary::utc).min();
        let end = commits.iter().map(CommitSummary::utc).max();
        Self {
            area: UsableArea::from_config(chart),
            domain: start.zip(end),
        }
    }

    pub fn area(&self) -> &UsableArea {
        &self.area
    }

    /// A zero-width time domain maps everything onto the middle of the range.
    pub fn x_for(&self, timestamp: DateTime<Utc>) -> f64 {
        let t = self
            .domain
            .and_then(|(start, end)| fraction_of(start, end, timestamp))
            .unwrap_or(0.5);
        self.area.left + t * self.area.width()
    }

    pub fn y_for(&self, hour_frac: f64) -> f64 {
        self.area.bottom - hour_frac / HOURS_PER_DAY * self.area.height()
    }

    /// Hour of day under `y`, clamped to one day.
    pub fn hour_at(&self, y: f64) -> f64 {
        ((self.area.bottom - y) / self.area.height() * HOURS_PER_DAY).clamp(0.0, HOURS_PER_DAY)
    }

    /// Timestamp under `x`, clamped to the commit extent.
    pub fn time_at(&self, x: f64) -> Option<DateTime<Utc>> {
        let (start, end) = self.domain?;
        let t = ((x - self.area.left) / self.area.width()).clamp(0.0, 1.0);
        Some(interpolate(start, end, t))
    }
}

impl Projection for ChartProjection {
    fn x(&self, commit: &CommitSummary) -> f64 {
        self.x_for(commit.utc())
    }

    fn y(&self, commit: &CommitSummary) -> f64 {
        self.y_for(commit.hour_frac)
    }
}

/// Square-root scale from a commit's line count onto `[min_radius, max_radius]`.
#[derive(Debug, Clone, Copy)]
pub struct RadiusScale {
    min_lines: f64,
    max_lines: f64,
    min_radius: f64,
    max_radius: f64,
}

impl RadiusScale {
    pub fn fit<'a, I>(commits: I, chart: &ChartConfig) -> Self
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let (min, max) = commits
            .into_iter()
            .map(|c| c.total_lines)
            .fold(None, |acc: Option<(usize, usize)>, n| match acc {
                Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
                None => Some((n, n)),
            })
            .unwrap_or((0, 0));
        Self {
            min_lines: min as f64,
            max_lines: max as f64,
            min_radius: chart.min_radius,
            max_radius: chart.max_radius,
        }
    }

    pub fn radius(&self, total_lines: usize) -> f64 {
        let lo = self.min_lines.sqrt();
        let hi = self.max_lines.sqrt();
        let t = if hi == lo {
            0.5
        } else {
            ((total_lines as f64).sqrt() - lo) / (hi - lo)
        };
        self.min_radius + t * (self.max_radius - self.min_radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour_frac: f64) -> Self {
        let h = hour_frac.rem_euclid(HOURS_PER_DAY);
        if !(6.0..20.0).contains(&h) {
            DayPeriod::Night
        } else if h < 12.0 {
            DayPeriod::Morning
        } else if h < 18.0 {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Evening
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayPeriod::Night => "night",
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::model::LineRecord;
    use pretty_assertions::assert_eq;

    fn commits(rows: &[(&str, usize)]) -> Vec<CommitSummary> {
        let mut records = Vec::new();
        for (i, (ts, n)) in rows.iter().enumerate() {
            for line in 1..=*n as u32 {
                records.push(LineRecord {
                    commit_id: format!("c{i}"),
                    file: "a.js".to_string(),
                    line,
                    depth: 0,
                    length: 1,
                    language: "js".to_string(),
                    author: "vs".to_string(),
                    timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
                });
            }
        }
        aggregate_commits(records)
    }

    #[test]
    fn projects_time_and_hour_into_usable_area() {
        let all = commits(&[("2024-01-01T00:00:00Z", 1), ("2024-01-11T12:00:00Z", 4)]);
        let proj = ChartProjection::fit(&all, &ChartConfig::default());
        assert_eq!(proj.x(&all[0]), 20.0);
        assert_eq!(proj.x(&all[1]), 990.0);
        assert_eq!(proj.y(&all[0]), 570.0);
        assert_eq!(proj.y(&all[1]), 570.0 - 0.5 * 560.0);
        assert_eq!(proj.hour_at(proj.y(&all[1])), 12.0);
    }

    #[test]
    fn single_instant_maps_to_middle() {
        let all = commits(&[("2024-01-01T06:00:00Z", 2)]);
        let proj = ChartProjection::fit(&all, &ChartConfig::default());
        assert_eq!(proj.x(&all[0]), 505.0);
        assert_eq!(proj.time_at(0.0), Some(all[0].utc()));
    }

    #[test]
    fn sub_millisecond_extent_spans_full_width() {
        let all = commits(&[("2024-01-01T00:00:00.0001Z", 1), ("2024-01-01T00:00:00.0009Z", 1)]);
        let proj = ChartProjection::fit(&all, &ChartConfig::default());
        assert_eq!(proj.x(&all[0]), 20.0);
        assert_eq!(proj.x(&all[1]), 990.0);
    }

    #[test]
    fn pointer_readout_inverts_projection() {
        let all = commits(&[("2024-01-01T00:00:00Z", 1), ("2024-01-11T00:00:00Z", 1)]);
        let proj = ChartProjection::fit(&all, &ChartConfig::default());
        assert_eq!(proj.time_at(20.0), Some(all[0].utc()));
        assert_eq!(proj.time_at(5000.0), Some(all[1].utc()));
        let middle = proj.time_at(505.0).unwrap();
        assert_eq!(middle.to_rfc3339(), "2024-01-06T00:00:00+00:00");
        assert_eq!(proj.hour_at(-50.0), 24.0);
        assert!(ChartProjection::fit(&[], &ChartConfig::default()).time_at(100.0).is_none());
    }

    #[test]
    fn radius_uses_square_root_of_lines() {
        let all = commits(&[("2024-01-01T00:00:00Z", 1), ("2024-01-02T00:00:00Z", 16)]);
        let scale = RadiusScale::fit(&all, &ChartConfig::default());
        assert_eq!(scale.radius(1), 3.0);
        assert_eq!(scale.radius(16), 20.0);
        assert!((scale.radius(4) - (3.0 + 17.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn periods_follow_clock_bands() {
        assert_eq!(DayPeriod::from_hour(2.0), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(6.0), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12.0), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(18.5), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(20.0), DayPeriod::Night);
    }
}
