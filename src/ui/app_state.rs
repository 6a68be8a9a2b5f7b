//! # Application State Management
//!
//! This module implements the central `AppState` struct which owns the
//! currently loaded drift report and coordinates rendering of all UI panels.
//! It implements the `eframe::App` trait to integrate with the egui
//! application framework.
//!
//! ## Responsibilities
//!
//! - Prompts for a logfile with an `rfd` file dialog on startup and on demand
//! - Runs the parsing pipeline when a file is picked and holds the result
//! - Shows fatal parse diagnostics in a modal alert (no plots are rendered)
//! - Delegates rendering to the position, drift, and summary panels
//! - Persists the last-used directory across application sessions

use eframe::egui;
use log::{error, info};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::parser::{self, DriftReport};
use crate::ui::{drift_panel, position_panel, summary_panel};

/// Central application state owning the parsed report and UI flags.
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Parsed drift report for the currently loaded logfile, if any.
    pub report: Option<DriftReport>,
    /// Whether a logfile has been picked (suppresses the startup dialog).
    logfile_selected: bool,
    // Persistence: last directory used for the logfile chooser
    last_open_dir: Option<String>,
}

#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    last_open_dir: Option<String>,
}

impl AppState {
    pub fn new(storage: Option<&dyn eframe::Storage>) -> Self {
        // Load persisted settings if available
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        Self {
            alert: None,
            report: None,
            logfile_selected: false,
            last_open_dir: persisted.last_open_dir,
        }
    }

    /// Run the parsing pipeline for a freshly picked logfile.
    ///
    /// On success the report replaces any previously loaded one and its
    /// summary is printed to the console. On failure the diagnostic is
    /// logged and raised as a modal alert; no plots are shown until a valid
    /// file is picked.
    fn open_logfile(&mut self, path: &Path) {
        info!("Loading logfile {}", path.display());
        match parser::load_report(path) {
            Ok(report) => {
                report.log_summary();
                self.report = Some(report);
            }
            Err(e) => {
                error!("{:#}", e);
                self.report = None;
                self.alert = Some(format!("{:#}", e));
            }
        }
    }

    /// Show the file dialog and load the picked file, remembering its
    /// directory for the next time.
    fn pick_logfile(&mut self) {
        let mut dialog = FileDialog::new().add_filter("EBPG logfile", &["log"]).add_filter("All files", &["*"]);
        if let Some(dir) = &self.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(file) = dialog.pick_file() {
            self.logfile_selected = true;
            // Remember directory for next time
            if let Some(parent) = file.parent() {
                self.last_open_dir = Some(parent.to_string_lossy().to_string());
            }
            self.open_logfile(&file);
        } else {
            // Dialog cancelled: stop prompting, leave the empty state visible
            self.logfile_selected = true;
        }
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            last_open_dir: self.last_open_dir.clone(),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.logfile_selected {
            self.pick_logfile();
        }

        if self.alert.is_some() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        if let Some(alert) = &self.alert {
                            ui.label(alert);
                        }
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None;
                            // Let the user try another file right away
                            self.logfile_selected = false;
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        // Panels layout: top (fixed) with controls, right (fixed) summary,
        // bottom (fixed) time series, position plot fills the remaining
        // space using CentralPanel.

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("EBPG Beam Drift Plotter");
                ui.separator();
                if ui.button("Open logfile...").clicked() {
                    self.logfile_selected = false;
                }
                if let Some(report) = &self.report {
                    ui.separator();
                    ui.label(report.source_path.display().to_string());
                }
            });
        });

        if let Some(report) = &self.report {
            summary_panel::render(ctx, report);
            drift_panel::render(ctx, report);
            position_panel::render(ctx, report);
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label("No logfile loaded. Use \"Open logfile...\" to pick a JMAN logfile.");
                });
            });
        }
    }
}
