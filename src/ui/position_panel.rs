//! # Central Position Plot
//!
//! Renders the scatter plot of calibration block positions relative to the
//! wafer center:
//! - Plot bounds are the wafer outline, ±size/2 on each axis
//! - Blocks are drawn as red crosses
//! - The wafer center is a filled blue marker at the origin
//! - Square aspect ratio so the wafer is not distorted

use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::parser::DriftReport;

/// Render the central panel with the relative-position scatter plot.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `report` - Parsed drift report providing geometry and block positions
pub fn render(ctx: &egui::Context, report: &DriftReport) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Drift Calibration Positions Relative to Wafer Center");
        ui.separator();

        let half_x = report.geometry.size_x_mm / 2.0;
        let half_y = report.geometry.size_y_mm / 2.0;

        let blocks: Vec<[f64; 2]> = report.relative_blocks.iter().map(|b| [b.rel_x_mm, b.rel_y_mm]).collect();

        Plot::new("relative_positions")
            .legend(Legend::default())
            .data_aspect(1.0)
            .include_x(-half_x)
            .include_x(half_x)
            .include_y(-half_y)
            .include_y(half_y)
            .x_axis_label("X (mm)")
            .y_axis_label("Y (mm)")
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new("Calibration blocks", PlotPoints::new(blocks))
                        .shape(MarkerShape::Cross)
                        .radius(6.0)
                        .color(Color32::RED),
                );
                plot_ui.points(
                    Points::new("Wafer Center", PlotPoints::new(vec![[0.0, 0.0]]))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0)
                        .color(Color32::from_rgb(0, 128, 255)),
                );
            });
    });
}
