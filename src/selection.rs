use crate::error::{LocError, Result};
use crate::model::CommitSummary;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maps a commit onto the rendering surface's 2-D space.
pub trait Projection {
    fn x(&self, commit: &CommitSummary) -> f64;
    fn y(&self, commit: &CommitSummary) -> f64;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn x(&self, commit: &CommitSummary) -> f64 {
        (**self).x(commit)
    }

    fn y(&self, commit: &CommitSummary) -> f64 {
        (**self).y(commit)
    }
}

/// Axis-aligned rectangle in projected space, corners normalized so `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    pub fn new(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl FromStr for Region {
    type Err = LocError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|e| LocError::InvalidRegion(format!("{s:?}: {e}")))
            })
            .collect::<Result<_>>()?;

        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Region::new((*x0, *y0), (*x1, *y1)))
            }
            _ => Err(LocError::InvalidRegion(format!(
                "{s:?}: expected four finite numbers x0,y0,x1,y1"
            ))),
        }
    }
}

pub fn is_selected<P: Projection + ?Sized>(
    region: Option<&Region>,
    commit: &CommitSummary,
    projection: &P,
) -> bool {
    match region {
        Some(r) => r.contains(projection.x(commit), projection.y(commit)),
        None => false,
    }
}

/// Subset of `candidates` (indices into `commits`) inside `region`, order preserved.
pub fn select_indices<P: Projection + ?Sized>(
    region: Option<&Region>,
    commits: &[CommitSummary],
    candidates: &[usize],
    projection: &P,
) -> Vec<usize> {
    if region.is_none() {
        return Vec::new();
    }
    candidates
        .iter()
        .copied()
        .filter(|&i| is_selected(region, &commits[i], projection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::model::LineRecord;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// x = day of month, y = hour fraction; counts projection calls.
    struct DayHour {
        calls: Cell<usize>,
    }

    impl Projection for DayHour {
        fn x(&self, commit: &CommitSummary) -> f64 {
            use chrono::Datelike;
            self.calls.set(self.calls.get() + 1);
            commit.timestamp.day() as f64
        }

        fn y(&self, commit: &CommitSummary) -> f64 {
            self.calls.set(self.calls.get() + 1);
            commit.hour_frac
        }
    }

    fn sample() -> Vec<CommitSummary> {
        let stamps = [
            "2024-01-01T09:00:00Z",
            "2024-01-02T13:30:00Z",
            "2024-01-05T22:00:00Z",
        ];
        let records = stamps
            .iter()
            .enumerate()
            .map(|(i, ts)| LineRecord {
                commit_id: format!("c{i}"),
                file: "a.js".to_string(),
                line: 1,
                depth: 0,
                length: 1,
                language: "js".to_string(),
                author: "vs".to_string(),
                timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            })
            .collect();
        aggregate_commits(records)
    }

    #[test]
    fn corners_are_normalized() {
        let r = Region::new((5.0, 20.0), (1.0, 10.0));
        assert_eq!(r, Region { x0: 1.0, y0: 10.0, x1: 5.0, y1: 20.0 });
        assert!(r.contains(1.0, 10.0));
        assert!(r.contains(5.0, 20.0));
        assert!(!r.contains(5.01, 15.0));
    }

    #[test]
    fn no_region_selects_nothing() {
        let commits = sample();
        let proj = DayHour { calls: Cell::new(0) };
        for c in &commits {
            assert!(!is_selected(None, c, &proj));
        }
        assert!(select_indices(None, &commits, &[0, 1, 2], &proj).is_empty());
        assert_eq!(proj.calls.get(), 0);
    }

    #[test]
    fn selects_only_candidates_inside_region() {
        let commits = sample();
        let proj = DayHour { calls: Cell::new(0) };
        let region = Region::new((0.0, 8.0), (3.0, 14.0));
        assert_eq!(select_indices(Some(&region), &commits, &[0, 1, 2], &proj), vec![0, 1]);
        // Commit 1 is inside the rectangle but not a candidate.
        assert_eq!(select_indices(Some(&region), &commits, &[0, 2], &proj), vec![0]);
    }

    #[test]
    fn predicate_is_idempotent_and_linear() {
        let commits = sample();
        let proj = DayHour { calls: Cell::new(0) };
        let region = Region::new((1.5, 0.0), (10.0, 24.0));
        let first: Vec<bool> = commits.iter().map(|c| is_selected(Some(&region), c, &proj)).collect();
        let second: Vec<bool> = commits.iter().map(|c| is_selected(Some(&region), c, &proj)).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![false, true, true]);
        assert_eq!(proj.calls.get(), 2 * 2 * commits.len());
    }

    #[test]
    fn region_above_every_point_is_empty() {
        let commits = sample();
        let proj = DayHour { calls: Cell::new(0) };
        let region = Region::new((0.0, 30.0), (31.0, 40.0));
        assert!(select_indices(Some(&region), &commits, &[0, 1, 2], &proj).is_empty());
    }

    #[test]
    fn parses_region_strings() {
        let r: Region = "10, 5, 2, 1".parse().unwrap();
        assert_eq!(r, Region::new((2.0, 1.0), (10.0, 5.0)));
        assert!("1,2,3".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
        assert!("1,2,3,NaN".parse::<Region>().is_err());
    }
}
