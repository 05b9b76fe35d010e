use assert_cmd::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const HEADER: &str = "commit,file,line,depth,length,type,author,datetime\n";

/// Three commits on consecutive days: morning, afternoon and late evening.
const HISTORY: &str = "\
c1aaaaaaaaaa,src/a.rs,1,0,12,Rust,alice,2024-01-01T09:00:00+00:00
c1aaaaaaaaaa,src/a.rs,2,1,30,Rust,alice,2024-01-01T09:00:00+00:00
c2bbbbbbbbbb,web/b.js,1,0,18,JavaScript,bob,2024-01-02T14:30:00+00:00
c2bbbbbbbbbb,web/b.js,2,2,44,JavaScript,bob,2024-01-02T14:30:00+00:00
c2bbbbbbbbbb,src/a.rs,3,1,25,Rust,bob,2024-01-02T14:30:00+00:00
c3cccccccccc,tools/c.py,1,0,9,Python,alice,2024-01-03T22:00:00+00:00
";

fn write_csv(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("loc.csv");
    let mut f = File::create(&path).unwrap();
    f.write_all(HEADER.as_bytes()).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f.sync_all().unwrap();
    path
}

fn run_json(data: &Path, args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("locscope").unwrap();
    cmd.arg("--data").arg(data).args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn summary_json_reports_full_history() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    let v = run_json(&data, &["summary", "--json"]);
    assert_eq!(v["control_position"].as_f64(), Some(100.0));
    assert_eq!(v["visible"]["commits"].as_u64(), Some(3));
    assert_eq!(v["visible"]["total_lines"].as_u64(), Some(6));
    assert_eq!(v["visible"]["files"].as_u64(), Some(3));
    assert_eq!(v["visible"]["max_depth"].as_u64(), Some(2));
    assert_eq!(v["visible"]["max_line_length"].as_u64(), Some(44));

    let languages: Vec<&str> = v["visible"]["languages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["language"].as_str().unwrap())
        .collect();
    assert_eq!(languages, ["Rust", "JavaScript", "Python"]);

    // No region means an empty selection.
    assert_eq!(v["selected"]["commits"].as_u64(), Some(0));
    assert!(v["selection"].is_null());
}

#[test]
fn position_zero_shows_only_earliest_commit() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    let v = run_json(&data, &["--position", "0", "commits", "--json"]);
    let commits = v["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["id"].as_str(), Some("c1aaaaaaaaaa"));
    assert_eq!(commits[0]["short_id"].as_str(), Some("c1aaaaa"));
    assert_eq!(commits[0]["total_lines"].as_u64(), Some(2));
}

#[test]
fn commits_are_largest_first_unless_chronological() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    let ids = |v: &serde_json::Value| -> Vec<String> {
        v["commits"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    };

    let by_size = run_json(&data, &["commits", "--json"]);
    assert_eq!(ids(&by_size), ["c2bbbbbbbbbb", "c1aaaaaaaaaa", "c3cccccccccc"]);

    let by_time = run_json(&data, &["commits", "--json", "--chronological", "--limit", "2"]);
    assert_eq!(ids(&by_time), ["c1aaaaaaaaaa", "c2bbbbbbbbbb"]);
}

#[test]
fn region_selects_matching_commit() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    // Default chart: the 09:00 commit on the first day sits near (20, 360).
    let v = run_json(&data, &["--region", "0,300,100,400", "summary", "--json"]);
    assert_eq!(v["selected"]["commits"].as_u64(), Some(1));
    assert_eq!(v["selected"]["total_lines"].as_u64(), Some(2));

    let commits = run_json(&data, &["--region", "0,300,100,400", "commits", "--json"]);
    let selected: Vec<&str> = commits["commits"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["selected"].as_bool() == Some(true))
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(selected, ["c1aaaaaaaaaa"]);
}

#[test]
fn region_without_points_selects_nothing() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    let v = run_json(&data, &["--region", "0,0,10,5", "summary", "--json"]);
    assert_eq!(v["selected"]["commits"].as_u64(), Some(0));
    assert_eq!(v["selected"]["languages"].as_array().map(|a| a.len()), Some(0));
    assert_eq!(v["visible"]["commits"].as_u64(), Some(3));
}

#[test]
fn files_json_lists_line_counts() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);

    let v = run_json(&data, &["files", "--json"]);
    let files: Vec<(String, u64)> = v["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["file"].as_str().unwrap().to_string(), f["lines"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        files,
        [
            ("src/a.rs".to_string(), 3),
            ("web/b.js".to_string(), 2),
            ("tools/c.py".to_string(), 1),
        ]
    );
}

#[test]
fn malformed_row_fails_with_row_and_field() {
    let dir = tempdir().unwrap();
    let data = write_csv(
        dir.path(),
        "c1,src/a.rs,1,0,12,Rust,alice,2024-01-01T09:00:00+00:00\n\
         c2,src/a.rs,two,0,12,Rust,bob,2024-01-02T09:00:00+00:00\n",
    );

    let mut cmd = Command::cargo_bin("locscope").unwrap();
    cmd.arg("--data").arg(&data).args(["summary", "--json"]);
    let out = cmd.assert().failure().get_output().stderr.clone();
    let stderr = String::from_utf8_lossy(&out);
    assert!(stderr.contains("Row 2"), "stderr was: {stderr}");
    assert!(stderr.contains("line"), "stderr was: {stderr}");
}

#[test]
fn missing_data_file_fails() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("locscope").unwrap();
    cmd.arg("--data")
        .arg(dir.path().join("absent.csv"))
        .args(["summary"]);
    cmd.assert().failure();
}

#[test]
fn config_file_sets_initial_position() {
    let dir = tempdir().unwrap();
    let data = write_csv(dir.path(), HISTORY);
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[explore]\ninitial_position = 0.0\n").unwrap();

    let mut cmd = Command::cargo_bin("locscope").unwrap();
    cmd.arg("--data")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .args(["summary", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["visible"]["commits"].as_u64(), Some(1));
}
