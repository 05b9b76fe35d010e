use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::selection::Region;
use crate::stats::ScopeStats;

pub const SCHEMA_VERSION: u32 = 1;

/// One line of source code as it stood after a commit touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub commit_id: String,
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub language: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
}

/// All line records sharing one commit id.
#[derive(Clone, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    lines: Arc<[LineRecord]>,
}

impl CommitSummary {
    pub(crate) fn new(
        id: String,
        author: String,
        timestamp: DateTime<FixedOffset>,
        lines: Vec<LineRecord>,
    ) -> Self {
        Self {
            id,
            author,
            hour_frac: hour_fraction(&timestamp),
            total_lines: lines.len(),
            timestamp,
            lines: lines.into(),
        }
    }

    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.timestamp.with_timezone(&Utc)
    }

    pub fn short_id(&self) -> &str {
        crate::util::short_hash(&self.id)
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base, self.id)
    }
}

impl fmt::Debug for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitSummary")
            .field("id", &self.id)
            .field("author", &self.author)
            .field("timestamp", &self.timestamp)
            .field("hour_frac", &self.hour_frac)
            .field("total_lines", &self.total_lines)
            .finish_non_exhaustive()
    }
}

/// Hour of day plus minutes as a fraction, in the commit's own offset.
pub fn hour_fraction(timestamp: &DateTime<FixedOffset>) -> f64 {
    use chrono::Timelike;
    timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub control_position: f64,
    pub window_cutoff: Option<DateTime<Utc>>,
    pub selection: Option<Region>,
    pub visible: ScopeStats,
    pub selected: ScopeStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitEntry {
    pub id: String,
    pub short_id: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub control_position: f64,
    pub window_cutoff: Option<DateTime<Utc>>,
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub control_position: f64,
    pub window_cutoff: Option<DateTime<Utc>>,
    pub files: Vec<crate::stats::FileLineCount>,
}
