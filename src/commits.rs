use std::collections::HashSet;

use crate::cli::CommonArgs;
use crate::coordinator::ViewModel;
use crate::fetch::open_coordinator;
use crate::model::{CommitEntry, CommitsOutput, SCHEMA_VERSION};
use crate::util::truncate;
use chrono::Utc;
use console::style;

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    chronological: bool,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let (config, coordinator) = open_coordinator(&common)?;
    let view = coordinator.view_model();
    let entries = commit_entries(&view, config.commit_url_base.as_deref(), chronological, limit);

    if json {
        let output = CommitsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: common.data.to_string_lossy().to_string(),
            control_position: view.control_position,
            window_cutoff: view.window_cutoff,
            commits: entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        output_table(&entries, view.visible.len());
    }

    Ok(())
}

fn commit_entries(
    view: &ViewModel<'_>,
    url_base: Option<&str>,
    chronological: bool,
    limit: Option<usize>,
) -> Vec<CommitEntry> {
    let selected: HashSet<&str> = view.selected_ids.iter().copied().collect();
    let mut visible = view.visible.clone();
    if chronological {
        visible.sort_by_key(|c| c.utc());
    }

    visible
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|c| CommitEntry {
            id: c.id.clone(),
            short_id: c.short_id().to_string(),
            author: c.author.clone(),
            timestamp: c.timestamp,
            hour_frac: c.hour_frac,
            total_lines: c.total_lines,
            selected: selected.contains(c.id.as_str()),
            url: url_base.map(|base| c.url(base)),
        })
        .collect()
}

fn output_table(entries: &[CommitEntry], total: usize) {
    if entries.is_empty() {
        println!("No commits in window");
        return;
    }

    println!(
        "{:<9} {:<20} {:<26} {:>6} {:>7}",
        style("Commit").bold(),
        style("Author").bold(),
        style("When").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(72));
    for e in entries {
        let marker = if e.selected { "*" } else { " " };
        println!(
            "{}{:<8} {:<20} {:<26} {:>6.2} {:>7}",
            marker,
            e.short_id,
            truncate(&e.author, 20),
            e.timestamp.format("%Y-%m-%d %H:%M %:z").to_string(),
            e.hour_frac,
            e.total_lines
        );
    }
    if total > entries.len() {
        println!("\n... and {} more commits", total - entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_commits;
    use crate::chart::ChartProjection;
    use crate::config::ChartConfig;
    use crate::coordinator::Coordinator;
    use crate::load::read_csv;
    use crate::selection::Region;
    use pretty_assertions::assert_eq;

    const DATA: &str = "commit,file,line,depth,length,type,author,datetime
aaaaaaaaaaaa,a.rs,1,0,4,Rust,alice,2024-01-01T09:00:00Z
bbbbbbbbbbbb,b.rs,1,0,4,Rust,bob,2024-01-02T14:30:00Z
bbbbbbbbbbbb,b.rs,2,0,4,Rust,bob,2024-01-02T14:30:00Z
cccccccccccc,c.rs,1,0,4,Rust,carol,2024-01-03T22:00:00Z
";

    fn coordinator() -> Coordinator<ChartProjection> {
        let commits = aggregate_commits(read_csv(DATA.as_bytes()).unwrap());
        let projection = ChartProjection::fit(&commits, &ChartConfig::default());
        Coordinator::new(commits, projection, 100.0)
    }

    #[test]
    fn entries_mark_selected_commits() {
        let mut c = coordinator();
        // The 09:00 commit on the first day projects to (20, 360).
        c.set_selection(Some(Region::new((0.0, 300.0), (100.0, 400.0))));
        let view = c.view_model();
        let entries = commit_entries(&view, Some("https://example.com/commit/"), false, None);

        let marks: Vec<(&str, bool)> = entries.iter().map(|e| (e.id.as_str(), e.selected)).collect();
        assert_eq!(
            marks,
            vec![("bbbbbbbbbbbb", false), ("aaaaaaaaaaaa", true), ("cccccccccccc", false)]
        );
        assert_eq!(
            entries[1].url.as_deref(),
            Some("https://example.com/commit/aaaaaaaaaaaa")
        );
    }

    #[test]
    fn chronological_order_and_limit() {
        let c = coordinator();
        let view = c.view_model();
        let ids: Vec<String> = commit_entries(&view, None, true, Some(2))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["aaaaaaaaaaaa", "bbbbbbbbbbbb"]);
        assert!(commit_entries(&view, None, false, None).iter().all(|e| e.url.is_none()));
    }
}
