use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::data::model::FlowDataset;
use crate::data::stats::FlowStats;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 640;
/// Pixel row where the chart row ends and the summary strip begins.
const SUMMARY_TOP: i32 = 480;

const SUMMARY_FILL: RGBColor = RGBColor(173, 216, 230);

// ---------------------------------------------------------------------------
// PNG rendering
// ---------------------------------------------------------------------------

/// Render the two-panel figure to `out`: speed-density on the left,
/// flow-density with the capacity marker on the right, and the summary text
/// block in a strip along the bottom.
pub fn render_png(
    out: &Path,
    scenario: &str,
    dataset: &FlowDataset,
    stats: &FlowStats,
) -> Result<()> {
    let root = BitMapBackend::new(out, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (chart_row, summary_strip) = root.split_vertically(SUMMARY_TOP);
    let panels = chart_row.split_evenly((1, 2));

    let x_max = pad_range(dataset.k_max());

    draw_speed_panel(&panels[0], dataset, x_max)?;
    draw_flow_panel(&panels[1], dataset, stats, x_max)?;
    draw_summary(&summary_strip, scenario, stats)?;

    root.present()?;
    Ok(())
}

/// Upper axis bound with headroom; keeps degenerate (all-zero) data plottable.
fn pad_range(max: f64) -> f64 {
    if max > 0.0 { max * 1.05 } else { 1.0 }
}

fn draw_speed_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    dataset: &FlowDataset,
    x_max: f64,
) -> Result<()> {
    let y_max = pad_range(dataset.speeds().fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(area)
        .caption("Speed-Density Relationship", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Density (veh/km)")
        .y_desc("Speed (km/h)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            dataset.records.iter().map(|r| (r.k, r.v)),
            BLUE.stroke_width(2),
        ))?
        .label("Speed")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_flow_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    dataset: &FlowDataset,
    stats: &FlowStats,
    x_max: f64,
) -> Result<()> {
    let y_max = pad_range(dataset.flows().fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(area)
        .caption("Flow-Density Relationship", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Density (veh/km)")
        .y_desc("Flow (veh/h)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            dataset.records.iter().map(|r| (r.k, r.q)),
            RED.stroke_width(2),
        ))?
        .label("Flow")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(std::iter::once(Circle::new(
            (stats.k_opt, stats.q_max),
            6,
            GREEN.filled(),
        )))?
        .label(format!("Capacity: {:.0} veh/h", stats.q_max))
        .legend(|(x, y)| Circle::new((x + 10, y), 5, GREEN.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_summary(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    scenario: &str,
    stats: &FlowStats,
) -> Result<()> {
    let lines = [
        "Analysis Summary:".to_string(),
        format!("Scenario: {scenario}"),
        format!("Free-flow speed: {:.1} km/h", stats.v_free),
        format!("Jam density: {:.1} veh/km", stats.k_jam),
        format!("Maximum flow: {:.0} veh/h", stats.q_max),
        format!("Optimal density: {:.1} veh/km", stats.k_opt),
        format!("Data points: {}", stats.points),
    ];

    area.draw(&Rectangle::new(
        [(10, 5), (430, 150)],
        SUMMARY_FILL.mix(0.85).filled(),
    ))?;
    area.draw(&Rectangle::new([(10, 5), (430, 150)], BLACK))?;

    for (i, line) in lines.iter().enumerate() {
        let style = if i == 0 {
            ("sans-serif", 18).into_font()
        } else {
            ("sans-serif", 16).into_font()
        };
        area.draw(&Text::new(
            line.clone(),
            (22, 14 + i as i32 * 19),
            style,
        ))?;
    }

    Ok(())
}
