use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::model::FlowDataset;
use crate::data::stats::FlowStats;

// ---------------------------------------------------------------------------
// Flow plots (central panel)
// ---------------------------------------------------------------------------

/// Render both relationship plots side by side.
pub fn flow_plots(ui: &mut Ui, dataset: &FlowDataset, stats: &FlowStats) {
    ui.columns(2, |columns| {
        speed_density_plot(&mut columns[0], dataset);
        flow_density_plot(&mut columns[1], dataset, stats);
    });
}

fn speed_density_plot(ui: &mut Ui, dataset: &FlowDataset) {
    let points: PlotPoints = dataset.records.iter().map(|r| [r.k, r.v]).collect();

    Plot::new("speed_density")
        .legend(Legend::default())
        .x_axis_label("Density (veh/km)")
        .y_axis_label("Speed (km/h)")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Speed")
                    .color(Color32::BLUE)
                    .width(2.0),
            );
        });
}

fn flow_density_plot(ui: &mut Ui, dataset: &FlowDataset, stats: &FlowStats) {
    let points: PlotPoints = dataset.records.iter().map(|r| [r.k, r.q]).collect();

    Plot::new("flow_density")
        .legend(Legend::default())
        .x_axis_label("Density (veh/km)")
        .y_axis_label("Flow (veh/h)")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Flow")
                    .color(Color32::RED)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(vec![[stats.k_opt, stats.q_max]])
                    .name(format!("Capacity: {:.0} veh/h", stats.q_max))
                    .shape(MarkerShape::Asterisk)
                    .radius(8.0)
                    .color(Color32::GREEN),
            );
        });
}
