use eframe::egui;

use crate::QuickPlot;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// The blocking display window shown after the PNG is written. Read-only: it
/// presents the already-loaded dataset and summary until the user closes it.
pub struct ViewerApp {
    scenario: String,
    quick: QuickPlot,
}

impl ViewerApp {
    pub fn new(scenario: impl Into<String>, quick: QuickPlot) -> Self {
        Self {
            scenario: scenario.into(),
            quick,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: scenario info ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.scenario, &self.quick);
        });

        // ---- Bottom panel: analysis summary ----
        egui::TopBottomPanel::bottom("summary_bar").show(ctx, |ui| {
            panels::summary_bar(ui, &self.quick.stats);
        });

        // ---- Central panel: the two plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::flow_plots(ui, &self.quick.dataset, &self.quick.stats);
        });
    }
}

/// Open the plot window and block until it is closed.
pub fn show(scenario: &str, quick: &QuickPlot) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 620.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let app = ViewerApp::new(scenario, quick.clone());
    eframe::run_native(
        &format!("Greenshields – {scenario}"),
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
