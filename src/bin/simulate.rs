//! Scenario runner: evaluate a symbolic traffic program and export its
//! measurements as CSV for the plotting front-end.
//!
//! ```bash
//! simulate input/rush_hour.txt
//! # or, resolved under input/ automatically:
//! simulate rush_hour.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use greenshields::OUTPUT_DIR;
use greenshields::scenario::{Engine, parse_program};

const INPUT_DIR: &str = "input";

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Run a Greenshields scenario program and export its CSV")]
struct Args {
    /// Program file; tried as given, then under `input/`
    program: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    // Bad usage exits 1; runtime program errors exit 2 (see below).
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

    for dir in [INPUT_DIR, OUTPUT_DIR] {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error: creating {dir}/: {e}");
            return ExitCode::from(2);
        }
    }

    match run(&args.program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(program: &Path) -> anyhow::Result<()> {
    let path = resolve_program(program)?;
    log::info!("running scenario program {}", path.display());

    let text = fs::read_to_string(&path)?;
    let commands = parse_program(&text)?;

    let mut engine = Engine::new(OUTPUT_DIR);
    engine.run(&commands)?;
    Ok(())
}

/// Try the path as given, then relative to `input/`.
fn resolve_program(program: &Path) -> anyhow::Result<PathBuf> {
    if program.exists() {
        return Ok(program.to_path_buf());
    }
    let fallback = PathBuf::from(INPUT_DIR).join(program);
    if fallback.exists() {
        return Ok(fallback);
    }
    anyhow::bail!("cannot open file: {}", program.display());
}
