use crate::cli::CommonArgs;
use crate::fetch::open_coordinator;
use crate::model::{FilesOutput, SCHEMA_VERSION};
use crate::stats::FileLineCount;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let (_, coordinator) = open_coordinator(&common)?;
    let state = *coordinator.state();

    let mut files = coordinator.visible_stats().file_lines.clone();
    files.sort_by(|a, b| b.lines.cmp(&a.lines));

    if json {
        let output = FilesOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: common.data.to_string_lossy().to_string(),
            control_position: state.control_position,
            window_cutoff: state.window_cutoff,
            files,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for f in &files {
            println!("{}", serde_json::to_string(f)?);
        }
    } else {
        output_table(&files);
    }

    Ok(())
}

fn output_table(files: &[FileLineCount]) {
    if files.is_empty() {
        println!("No files in window");
        return;
    }

    println!("{:<60} {:>10}", style("File").bold(), style("Lines").bold());
    println!("{}", "─".repeat(72));
    for f in files {
        println!("{:<60} {:>10}", f.file, format!("{} lines", f.lines));
    }
}
