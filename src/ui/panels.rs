use eframe::egui::{self, RichText, Ui};

use crate::QuickPlot;
use crate::data::stats::FlowStats;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Scenario name, measurement count and the path of the saved figure.
pub fn top_bar(ui: &mut Ui, scenario: &str, quick: &QuickPlot) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new(scenario).strong());
        ui.separator();
        ui.label(format!("{} measurements", quick.dataset.len()));
        ui.separator();
        ui.label(format!("saved to {}", quick.png_path.display()));
    });
}

// ---------------------------------------------------------------------------
// Summary bar
// ---------------------------------------------------------------------------

/// The derived statistics, mirroring the annotation block of the PNG.
pub fn summary_bar(ui: &mut Ui, stats: &FlowStats) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Analysis summary:");
        ui.label(format!("free-flow speed {:.1} km/h", stats.v_free));
        ui.separator();
        ui.label(format!("jam density {:.1} veh/km", stats.k_jam));
        ui.separator();
        ui.label(format!(
            "max flow {:.0} veh/h at {:.1} veh/km",
            stats.q_max, stats.k_opt
        ));
        ui.separator();
        ui.label(format!("{} data points", stats.points));
    });
}
