use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::selection::Region;

#[derive(Parser)]
#[command(name = "locscope")]
#[command(about = "Explore commit history from a per-line code change log")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the line change log (CSV)")]
    pub data: PathBuf,

    #[arg(long, help = "Path to config file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true, help = "Time window control position, 0-100 (default from config)")]
    pub position: Option<f64>,

    #[arg(long, allow_hyphen_values = true, help = "Selection rectangle in chart coordinates: x0,y0,x1,y1")]
    pub region: Option<Region>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Statistics for the visible window and the selection
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits inside the visible window
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Sort oldest first instead of largest first")]
        chronological: bool,

        #[arg(long, help = "Only show this many commits")]
        limit: Option<usize>,
    },
    /// Line counts per file inside the visible window
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive terminal explorer
    #[command(alias = "tui", alias = "ui")]
    Explore,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Summary { json, ndjson } => crate::summary::exec(self.common, json, ndjson),
            Commands::Commits {
                json,
                ndjson,
                chronological,
                limit,
            } => crate::commits::exec(self.common, json, ndjson, chronological, limit),
            Commands::Files { json, ndjson } => crate::files::exec(self.common, json, ndjson),
            Commands::Explore => crate::tui::run(&self.common),
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Explore)
    }
}
