//! # Right Panel - Run Summary and Position Table
//!
//! This module renders the fixed-width right panel displaying the parsed
//! run metadata and measurement summary:
//! - Run date and start time
//! - Wafer center and size
//! - Min/max drift rates per axis (selected by magnitude)
//! - Complete relative-position listing in a scrollable, virtualized table
//!
//! ## Position Table
//!
//! The table uses `egui_extras::TableBuilder` for virtualized rendering, so
//! logfiles with thousands of calibration stops scroll smoothly. Rows are
//! listed in `(block, x, y)` sort order, matching the console listing.

use eframe::egui;
use egui::Color32;
use egui_extras::{Column, TableBuilder};

use crate::parser::DriftReport;

/// Render the right summary panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `report` - Parsed drift report
pub fn render(ctx: &egui::Context, report: &DriftReport) {
    egui::SidePanel::right("summary_right").exact_width(360.0).show(ctx, |ui| {
        ui.heading("Run Summary");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Run date:");
            ui.label(egui::RichText::new(&report.metadata.date).strong());
        });
        ui.horizontal(|ui| {
            ui.label("Start time:");
            ui.label(egui::RichText::new(&report.metadata.start_time).strong());
        });
        ui.horizontal(|ui| {
            ui.label("Wafer centre (mm):");
            ui.label(egui::RichText::new(format!("({}, {})", report.geometry.center_x_mm, report.geometry.center_y_mm)).strong());
        });
        ui.horizontal(|ui| {
            ui.label("Wafer size (mm):");
            ui.label(egui::RichText::new(format!("({}, {})", report.geometry.size_x_mm, report.geometry.size_y_mm)).strong());
        });
        ui.horizontal(|ui| {
            ui.label("Drift samples:");
            ui.label(egui::RichText::new(report.samples.len().to_string()).strong());
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("X Min/Max:");
            ui.label(
                egui::RichText::new(format!("{:.2} / {:.2} nm", report.extremes.min_dx, report.extremes.max_dx))
                    .strong()
                    .color(Color32::from_rgb(0, 128, 255)),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Y Min/Max:");
            ui.label(
                egui::RichText::new(format!("{:.2} / {:.2} nm", report.extremes.min_dy, report.extremes.max_dy))
                    .strong()
                    .color(Color32::from_rgb(0, 128, 255)),
            );
        });

        ui.separator();
        ui.heading("Relative Positions");
        ui.add_space(4.0);

        let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(60.0).at_least(40.0)) // Block
            .column(Column::remainder()) // X
            .column(Column::remainder()) // Y
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Block");
                });
                header.col(|ui| {
                    ui.strong("X (mm)");
                });
                header.col(|ui| {
                    ui.strong("Y (mm)");
                });
            })
            .body(|body| {
                // Virtualized rows: only build visible rows
                let row_count = report.relative_blocks.len();
                body.rows(row_height, row_count, |mut row| {
                    let block = &report.relative_blocks[row.index()];
                    row.col(|ui| {
                        ui.label(format!("#{}", block.block_number));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", block.rel_x_mm));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", block.rel_y_mm));
                    });
                });
            });
    });
}
