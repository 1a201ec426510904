//! Symbolic scenario programs for the Greenshields model.
//!
//! A program is one command per line, `#` comments and blank lines skipped:
//!
//! ```text
//! FREE_FLOW        100
//! JAM_DENSITY      200
//! DENSITY_RANGE    0 200 5
//! COMPUTE_SPEED
//! COMPUTE_FLOW
//! CAPACITY
//! EXPORT_CSV       rush_hour
//! PRINT_RESULTS
//! ```
//!
//! Speeds follow the linear Greenshields relation `v = v_free * (1 - k/k_jam)`
//! and flows are `q = k * v`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::model::FlowRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("line {line}: {keyword} requires {what}")]
    MissingOperand {
        line: usize,
        keyword: &'static str,
        what: &'static str,
    },
    #[error("line {line}: '{token}' is not a number")]
    BadNumber { line: usize, token: String },
    #[error("line {line}: {msg}")]
    Precondition { line: usize, msg: &'static str },
    #[error("no valid commands in program")]
    EmptyProgram,
    #[error("exporting CSV")]
    Export(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One parsed program command, tagged with its source line for error reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub line: usize,
    pub node: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FreeFlow(f64),
    JamDensity(f64),
    DensityRange { start: f64, end: f64, step: f64 },
    ComputeSpeed,
    ComputeFlow,
    Capacity,
    ExportCsv(String),
    PrintResults,
    /// Unrecognized keyword, warned about and skipped at execution time.
    Unknown(String),
}

/// Parse a scenario program into commands.
pub fn parse_program(text: &str) -> Result<Vec<Spanned<Command>>, ScenarioError> {
    let mut commands = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut tokens = raw.split_whitespace();
        let keyword = match tokens.next() {
            Some(kw) if !kw.starts_with('#') => kw,
            _ => continue,
        };
        let operands: Vec<&str> = tokens.collect();

        let node = match keyword {
            "FREE_FLOW" => Command::FreeFlow(number(
                &operands, 0, line, "FREE_FLOW", "speed value",
            )?),
            "JAM_DENSITY" => Command::JamDensity(number(
                &operands, 0, line, "JAM_DENSITY", "density value",
            )?),
            "DENSITY_RANGE" => {
                if operands.len() < 3 {
                    return Err(ScenarioError::MissingOperand {
                        line,
                        keyword: "DENSITY_RANGE",
                        what: "start, end, step",
                    });
                }
                Command::DensityRange {
                    start: number(&operands, 0, line, "DENSITY_RANGE", "start")?,
                    end: number(&operands, 1, line, "DENSITY_RANGE", "end")?,
                    step: number(&operands, 2, line, "DENSITY_RANGE", "step")?,
                }
            }
            "COMPUTE_SPEED" => Command::ComputeSpeed,
            "COMPUTE_FLOW" => Command::ComputeFlow,
            "CAPACITY" => Command::Capacity,
            "EXPORT_CSV" => match operands.first() {
                Some(name) => Command::ExportCsv((*name).to_string()),
                None => {
                    return Err(ScenarioError::MissingOperand {
                        line,
                        keyword: "EXPORT_CSV",
                        what: "filename",
                    });
                }
            },
            "PRINT_RESULTS" => Command::PrintResults,
            other => Command::Unknown(other.to_string()),
        };

        commands.push(Spanned { line, node });
    }

    if commands.is_empty() {
        return Err(ScenarioError::EmptyProgram);
    }
    Ok(commands)
}

fn number(
    operands: &[&str],
    idx: usize,
    line: usize,
    keyword: &'static str,
    what: &'static str,
) -> Result<f64, ScenarioError> {
    let token = operands
        .get(idx)
        .ok_or(ScenarioError::MissingOperand { line, keyword, what })?;
    token
        .parse::<f64>()
        .map_err(|_| ScenarioError::BadNumber {
            line,
            token: (*token).to_string(),
        })
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Mutable evaluation state of a scenario program.
#[derive(Debug)]
pub struct Engine {
    output_dir: PathBuf,
    pub v_free: f64,
    pub k_jam: f64,
    pub k: Vec<f64>,
    pub v: Vec<f64>,
    pub q: Vec<f64>,
    pub q_max: f64,
    pub k_opt: f64,
    pub csv_name: Option<String>,
}

impl Engine {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Engine {
            output_dir: output_dir.into(),
            v_free: 0.0,
            k_jam: 0.0,
            k: Vec::new(),
            v: Vec::new(),
            q: Vec::new(),
            q_max: 0.0,
            k_opt: 0.0,
            csv_name: None,
        }
    }

    /// Execute a full program in order.
    pub fn run(&mut self, program: &[Spanned<Command>]) -> Result<(), ScenarioError> {
        for cmd in program {
            self.execute(cmd)?;
        }
        Ok(())
    }

    fn execute(&mut self, cmd: &Spanned<Command>) -> Result<(), ScenarioError> {
        let line = cmd.line;
        match &cmd.node {
            Command::FreeFlow(v) => {
                self.v_free = *v;
                println!("[INFO] Free-flow speed: {} km/h", self.v_free);
            }
            Command::JamDensity(k) => {
                self.k_jam = *k;
                println!("[INFO] Jam density: {} veh/km", self.k_jam);
            }
            Command::DensityRange { start, end, step } => {
                if *step <= 0.0 {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "step must be positive",
                    });
                }
                self.k.clear();
                let mut k = *start;
                while k <= end + 1e-6 {
                    self.k.push(k);
                    k += step;
                }
                println!(
                    "[INFO] Density range: {start} to {end} step {step} ({} points)",
                    self.k.len()
                );
            }
            Command::ComputeSpeed => {
                if self.k.is_empty() {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "need density values first",
                    });
                }
                if self.v_free == 0.0 || self.k_jam == 0.0 {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "set FREE_FLOW and JAM_DENSITY first",
                    });
                }
                self.v = self
                    .k
                    .iter()
                    .map(|&k| self.v_free * (1.0 - k / self.k_jam))
                    .collect();
                println!("[INFO] Speed computed for {} points", self.k.len());
            }
            Command::ComputeFlow => {
                if self.k.is_empty() || self.v.is_empty() {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "need density and speed values first",
                    });
                }
                self.q = self
                    .k
                    .iter()
                    .zip(self.v.iter())
                    .map(|(&k, &v)| k * v)
                    .collect();
                println!("[INFO] Flow computed for {} points", self.k.len());
            }
            Command::Capacity => {
                if self.q.is_empty() {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "need flow values first",
                    });
                }
                let mut best = f64::NEG_INFINITY;
                for (i, &q) in self.q.iter().enumerate() {
                    if q > best {
                        best = q;
                        self.k_opt = self.k[i];
                    }
                }
                self.q_max = best;
                println!(
                    "[INFO] Capacity: q_max = {} veh/h at k = {} veh/km",
                    self.q_max, self.k_opt
                );
            }
            Command::ExportCsv(name) => {
                if self.k.is_empty() || self.v.is_empty() || self.q.is_empty() {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "need data to export",
                    });
                }
                let path = self.csv_path(name);
                self.export_csv(&path)?;
                self.csv_name = Some(name.clone());
                println!("[INFO] CSV exported: {}", path.display());
            }
            Command::PrintResults => {
                if self.q.is_empty() {
                    return Err(ScenarioError::Precondition {
                        line,
                        msg: "no results to print",
                    });
                }
                self.print_results();
            }
            Command::Unknown(kw) => {
                println!("[WARNING] Unknown command: {kw}");
            }
        }
        Ok(())
    }

    /// Destination of `EXPORT_CSV <name>`.
    pub fn csv_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.csv"))
    }

    fn export_csv(&self, path: &Path) -> Result<(), ScenarioError> {
        let mut writer = csv::Writer::from_path(path)?;
        for i in 0..self.k.len() {
            writer.serialize(FlowRecord {
                k: self.k[i],
                v: self.v[i],
                q: self.q[i],
            })?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    fn print_results(&self) {
        let rule = "=".repeat(50);
        println!("\n{rule}");
        println!("FINAL ANALYSIS RESULTS:");
        println!("{rule}");
        println!("Free-flow speed: {} km/h", self.v_free);
        println!("Jam density: {} veh/km", self.k_jam);
        println!("Maximum flow: {} veh/h", self.q_max);
        println!("Optimal density: {} veh/km", self.k_opt);
        println!("Number of data points: {}", self.k.len());
        if let Some(name) = &self.csv_name {
            println!("CSV file: {}", self.csv_path(name).display());
        }
        println!("{rule}");

        // Marker consumed by plotting front-ends to pick up the export.
        if let Some(name) = &self.csv_name {
            println!("PLOT_DATA:{name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;

    const PROGRAM: &str = "\
# Traffic Scenario: example
FREE_FLOW        100
JAM_DENSITY      200

DENSITY_RANGE    0 200 5
COMPUTE_SPEED
COMPUTE_FLOW
CAPACITY
EXPORT_CSV       example
PRINT_RESULTS
";

    #[test]
    fn parses_commands_and_skips_comments() {
        let program = parse_program(PROGRAM).unwrap();
        assert_eq!(program.len(), 8);
        assert_eq!(program[0].node, Command::FreeFlow(100.0));
        assert_eq!(program[0].line, 2);
        assert_eq!(
            program[2].node,
            Command::DensityRange { start: 0.0, end: 200.0, step: 5.0 }
        );
    }

    #[test]
    fn unknown_keyword_is_kept_for_a_warning() {
        let program = parse_program("WIBBLE 1 2\nPRINT_RESULTS\n").unwrap();
        assert_eq!(program[0].node, Command::Unknown("WIBBLE".into()));
    }

    #[test]
    fn bad_number_reports_line_and_token() {
        let err = parse_program("FREE_FLOW fast\n").unwrap_err();
        assert!(matches!(err, ScenarioError::BadNumber { line: 1, .. }), "{err}");
    }

    #[test]
    fn empty_program_is_an_error() {
        assert!(matches!(
            parse_program("# only comments\n\n"),
            Err(ScenarioError::EmptyProgram)
        ));
    }

    #[test]
    fn greenshields_relation_holds() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new(dir.path());
        let program = parse_program(
            "FREE_FLOW 100\nJAM_DENSITY 200\nDENSITY_RANGE 0 200 50\nCOMPUTE_SPEED\nCOMPUTE_FLOW\nCAPACITY\n",
        )
        .unwrap();
        engine.run(&program).unwrap();

        assert_eq!(engine.k, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(engine.v, vec![100.0, 75.0, 50.0, 25.0, 0.0]);
        assert_eq!(engine.q[2], 5000.0);
        // Capacity of the linear model sits at half the jam density.
        assert_eq!(engine.q_max, 5000.0);
        assert_eq!(engine.k_opt, 100.0);
    }

    #[test]
    fn compute_speed_requires_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new(dir.path());
        let program = parse_program("DENSITY_RANGE 0 10 1\nCOMPUTE_SPEED\n").unwrap();
        let err = engine.run(&program).unwrap_err();
        assert!(matches!(err, ScenarioError::Precondition { line: 2, .. }), "{err}");
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = Engine::new(dir.path());
        let program = parse_program(PROGRAM).unwrap();
        engine.run(&program).unwrap();

        let dataset = loader::load_csv(&dir.path().join("example.csv")).unwrap();
        assert_eq!(dataset.len(), 41);
        assert_eq!(dataset.records[0].v, 100.0);
        assert_eq!(dataset.records.last().unwrap().v, 0.0);
    }
}
