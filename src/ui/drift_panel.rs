//! # Drift-Rate Time Series Plot
//!
//! Renders the bottom panel with both drift-rate series plotted against
//! minutes elapsed since the first calibration sample. The panel title
//! carries the run start date and time from the logfile, and the min/max
//! drift magnitudes per axis are annotated as text, centered under the
//! plot, mirroring the console summary.

use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::parser::DriftReport;

/// Fixed height of the time-series panel in pixels.
const PANEL_HEIGHT: f32 = 320.0;

/// Render the bottom panel with the drift-rate time series.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `report` - Parsed drift report providing samples and extremes
pub fn render(ctx: &egui::Context, report: &DriftReport) {
    egui::TopBottomPanel::bottom("drift_rates").exact_height(PANEL_HEIGHT).show(ctx, |ui| {
        ui.heading(format!("Start time {},{}", report.metadata.date, report.metadata.start_time));
        ui.separator();

        let minutes = report.elapsed_minutes();
        let dx_series: Vec<[f64; 2]> = minutes.iter().zip(&report.samples).map(|(m, s)| [*m, s.dx_rate]).collect();
        let dy_series: Vec<[f64; 2]> = minutes.iter().zip(&report.samples).map(|(m, s)| [*m, s.dy_rate]).collect();

        // Leave room below the plot for the min/max annotation
        let annotation_height = 2.0 * ui.text_style_height(&egui::TextStyle::Body) + 8.0;
        let plot_height = (ui.available_height() - annotation_height).max(0.0);

        Plot::new("drift_rate_series")
            .legend(Legend::default())
            .height(plot_height)
            .x_axis_label("Minutes (min)")
            .y_axis_label("Beam Drift (nm/min)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new("x drift", PlotPoints::new(dx_series)).color(Color32::from_rgb(31, 119, 180)));
                plot_ui.line(Line::new("y drift", PlotPoints::new(dy_series)).color(Color32::from_rgb(255, 127, 14)));
            });

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(report.summary_text()).small());
        });
    });
}
