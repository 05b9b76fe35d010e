use anyhow::Result;
use clap::Parser;
use locscope::cli::Cli;
use locscope::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.is_interactive() {
        // Run without logging rather than writing over the terminal UI.
        let _ = logging::init_logging_file();
    } else {
        logging::init_logging_stderr();
    }
    cli.execute()
}
