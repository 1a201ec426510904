use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use greenshields::{OUTPUT_DIR, app, quick_plot};

/// Render speed-density and flow-density charts for an analyzed scenario.
#[derive(Parser, Debug)]
#[command(name = "greenshields")]
#[command(about = "Render speed-density and flow-density charts for a traffic scenario")]
struct Args {
    /// Scenario name; reads `output/<name>.csv`, writes `output/<name>_plot.png`
    scenario: String,

    /// Skip the interactive plot window after saving the PNG
    #[arg(long)]
    no_show: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    // Usage problems exit 1 like any other failure; --help/--version exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Error: creating {OUTPUT_DIR}/: {e}");
        return ExitCode::FAILURE;
    }

    match quick_plot(Path::new(OUTPUT_DIR), &args.scenario) {
        Ok(result) => {
            if !args.no_show {
                // Headless sessions can't open a window; the PNG on disk is
                // already written, so degrade to a warning.
                if let Err(e) = app::show(&args.scenario, &result) {
                    log::warn!("could not open plot window: {e}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
