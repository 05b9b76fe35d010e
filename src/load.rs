use crate::error::{LocError, Result};
use crate::model::LineRecord;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub type RawRow = HashMap<String, String>;

const COMMIT: &[&str] = &["commit", "commitId", "commit_id"];
const FILE: &[&str] = &["file", "path"];
const LINE: &[&str] = &["line", "lineNumber", "line_number"];
const DEPTH: &[&str] = &["depth", "nestingDepth", "nesting_depth"];
const LENGTH: &[&str] = &["length", "lineLength", "line_length"];
const LANGUAGE: &[&str] = &["type", "language"];
const AUTHOR: &[&str] = &["author"];
const DATETIME: &[&str] = &["datetime", "timestamp"];
const DATE: &[&str] = &["date"];
const TIME: &[&str] = &["time"];
const TIMEZONE: &[&str] = &["timezone", "tz"];

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<LineRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let records = read_csv(file)?;
    info!(path = %path.display(), rows = records.len(), "loaded line records");
    Ok(records)
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<LineRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<RawRow>() {
        rows.push(row?);
    }
    load_records(rows)
}

/// Parse rows in source order; the first bad row aborts the whole load.
pub fn load_records<I>(rows: I) -> Result<Vec<LineRecord>>
where
    I: IntoIterator<Item = RawRow>,
{
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| parse_row(idx + 1, &row))
        .collect()
}

pub fn parse_row(row_no: usize, row: &RawRow) -> Result<LineRecord> {
    let record = LineRecord {
        commit_id: required(row_no, row, COMMIT)?.to_string(),
        file: required(row_no, row, FILE)?.to_string(),
        line: parse_number(row_no, row, LINE)?,
        depth: parse_number(row_no, row, DEPTH)?,
        length: parse_number(row_no, row, LENGTH)?,
        language: required(row_no, row, LANGUAGE)?.to_string(),
        author: required(row_no, row, AUTHOR)?.to_string(),
        timestamp: parse_timestamp(row_no, row)?,
    };

    if record.line == 0 {
        return Err(LocError::InvalidField {
            row: row_no,
            field: LINE[0],
            value: "0".to_string(),
            reason: "line numbers start at 1".to_string(),
        });
    }

    Ok(record)
}

fn lookup<'a>(row: &'a RawRow, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

fn required<'a>(row_no: usize, row: &'a RawRow, names: &[&'static str]) -> Result<&'a str> {
    lookup(row, names).ok_or(LocError::MissingField {
        row: row_no,
        field: names[0],
    })
}

fn parse_number(row_no: usize, row: &RawRow, names: &[&'static str]) -> Result<u32> {
    let raw = required(row_no, row, names)?;
    raw.parse::<u32>().map_err(|e| LocError::InvalidField {
        row: row_no,
        field: names[0],
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `datetime` wins when present; otherwise `date`, `time` and `timezone` are combined.
fn parse_timestamp(row_no: usize, row: &RawRow) -> Result<DateTime<FixedOffset>> {
    if let Some(raw) = lookup(row, DATETIME) {
        return DateTime::parse_from_rfc3339(raw).map_err(|e| LocError::InvalidField {
            row: row_no,
            field: DATETIME[0],
            value: raw.to_string(),
            reason: e.to_string(),
        });
    }

    let parts = (lookup(row, DATE), lookup(row, TIME), lookup(row, TIMEZONE));
    if parts == (None, None, None) {
        return Err(LocError::MissingField {
            row: row_no,
            field: DATETIME[0],
        });
    }
    let date = required(row_no, row, DATE)?;
    let time = required(row_no, row, TIME)?;
    let tz = required(row_no, row, TIMEZONE)?;

    let time = if time.matches(':').count() == 1 {
        format!("{time}:00")
    } else {
        time.to_string()
    };
    let combined = format!("{date}T{time}{}", normalize_offset(tz));
    debug!(row = row_no, %combined, "combined date, time and timezone");

    DateTime::parse_from_rfc3339(&combined).map_err(|e| LocError::InvalidField {
        row: row_no,
        field: DATE[0],
        value: combined.clone(),
        reason: e.to_string(),
    })
}

/// Accepts `Z`, `+HH:MM` and `+HHMM`.
fn normalize_offset(tz: &str) -> String {
    if tz.eq_ignore_ascii_case("z") {
        return "+00:00".to_string();
    }
    let bytes = tz.as_bytes();
    if bytes.len() == 5 && (bytes[0] == b'+' || bytes[0] == b'-') && tz[1..].bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}:{}", &tz[..3], &tz[3..]);
    }
    tz.to_string()
}
