use crate::aggregate::aggregate_commits;
use crate::chart::ChartProjection;
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::coordinator::Coordinator;
use crate::load::load_path;
use crate::model::CommitSummary;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Load and aggregate the log, optionally with a spinner on stderr.
pub fn fetch_commits(path: &Path, show_progress: bool) -> anyhow::Result<Vec<CommitSummary>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}...", path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };
    load_with_progress(path, &pb)
}

fn load_with_progress(path: &Path, pb: &ProgressBar) -> anyhow::Result<Vec<CommitSummary>> {
    let loaded = load_path(path)
        .with_context(|| format!("Failed to load line records from {}", path.display()));
    pb.finish_and_clear();
    Ok(aggregate_commits(loaded?))
}

pub fn open_coordinator(common: &CommonArgs) -> anyhow::Result<(Config, Coordinator<ChartProjection>)> {
    let config = Config::load(common.config.as_deref()).context("Failed to load config")?;
    let commits = fetch_commits(&common.data, true)?;
    let projection = ChartProjection::fit(&commits, &config.chart);
    let position = common.position.unwrap_or(config.explore.initial_position);

    let mut coordinator = Coordinator::new(commits, projection, position);
    if common.region.is_some() {
        coordinator.set_selection(common.region);
    }
    Ok((config, coordinator))
}
