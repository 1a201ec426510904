//! Greenshields traffic-flow analysis.
//!
//! Two entry points share this library:
//! * the `greenshields` binary renders the quick-plot figure for a scenario's
//!   exported measurements (`output/<scenario>.csv`);
//! * the `simulate` binary runs a symbolic scenario program through the
//!   Greenshields model and exports those measurements.

pub mod app;
pub mod chart;
pub mod data;
pub mod scenario;
pub mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::data::loader;
use crate::data::model::FlowDataset;
use crate::data::stats::FlowStats;

/// Directory scenario CSVs are read from and plots are written to.
pub const OUTPUT_DIR: &str = "output";

// ---------------------------------------------------------------------------
// Quick plot – the one operation of the plotting binary
// ---------------------------------------------------------------------------

/// Result of a successful quick-plot run, kept around so the display window
/// can reuse the loaded data.
#[derive(Debug, Clone)]
pub struct QuickPlot {
    pub dataset: FlowDataset,
    pub stats: FlowStats,
    pub png_path: PathBuf,
}

/// Load `<output_dir>/<scenario>.csv`, derive the summary statistics, render
/// the figure to `<output_dir>/<scenario>_plot.png` and print the result
/// lines.
///
/// A missing or unparseable input file surfaces as `Err`, as does any
/// downstream rendering failure; callers map that to a non-zero exit.
pub fn quick_plot(output_dir: &Path, scenario: &str) -> Result<QuickPlot> {
    let csv_path = output_dir.join(format!("{scenario}.csv"));
    let png_path = output_dir.join(format!("{scenario}_plot.png"));

    if !csv_path.exists() {
        bail!("file {} not found", csv_path.display());
    }

    let dataset = loader::load_csv(&csv_path)
        .with_context(|| format!("reading {}", csv_path.display()))?;
    log::info!("loaded {} measurements from {}", dataset.len(), csv_path.display());

    let stats = FlowStats::compute(&dataset)?;

    chart::render_png(&png_path, scenario, &dataset, &stats)
        .with_context(|| format!("rendering {}", png_path.display()))?;

    println!("✓ Plot generated: {}", png_path.display());
    println!("✓ Data points: {}", stats.points);
    println!(
        "✓ Maximum flow: {:.0} veh/h at density {:.1} veh/km",
        stats.q_max, stats.k_opt
    );

    Ok(QuickPlot {
        dataset,
        stats,
        png_path,
    })
}
