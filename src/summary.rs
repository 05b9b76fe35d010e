use crate::cli::CommonArgs;
use crate::fetch::open_coordinator;
use crate::model::{SummaryOutput, SCHEMA_VERSION};
use crate::stats::ScopeStats;
use crate::util::{format_percent, selection_label};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (_, coordinator) = open_coordinator(&common)?;
    let state = *coordinator.state();

    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: common.data.to_string_lossy().to_string(),
        control_position: state.control_position,
        window_cutoff: state.window_cutoff,
        selection: state.selection,
        visible: coordinator.visible_stats().clone(),
        selected: coordinator.selected_stats().clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        output_summary(&output);
    }

    Ok(())
}

fn output_summary(output: &SummaryOutput) {
    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(50));

    match output.window_cutoff {
        Some(cutoff) => println!(
            "Window: {:.1}% (commits up to {})",
            output.control_position,
            style(cutoff.format("%Y-%m-%d %H:%M UTC")).dim()
        ),
        None => println!("No data to display"),
    }
    println!();

    output_stats(&output.visible);

    if let Some(region) = &output.selection {
        println!();
        println!(
            "{} [{:.0},{:.0}]–[{:.0},{:.0}]",
            style("Selection").bold(),
            region.x0,
            region.y0,
            region.x1,
            region.y1
        );
        println!("{}", selection_label(output.selected.commits));
        if !output.selected.is_empty() {
            output_stats(&output.selected);
        }
    }
}

fn output_stats(stats: &ScopeStats) {
    let rows = [
        ("TOTAL LOC", stats.total_lines.to_string()),
        ("COMMITS", stats.commits.to_string()),
        ("FILES", stats.files.to_string()),
        ("MAX DEPTH", stats.max_depth.to_string()),
        ("LONGEST LINE", stats.max_line_length.to_string()),
        ("MAX LINES", stats.max_lines_in_file.to_string()),
    ];
    for (label, value) in rows {
        println!("{:<14} {}", label, style(value).cyan());
    }

    if !stats.languages.is_empty() {
        println!();
        for share in &stats.languages {
            println!(
                "{:<14} {:>6} lines ({})",
                share.language,
                share.count,
                style(format_percent(share.proportion)).yellow()
            );
        }
    }
}
