//! EBPG Beam Drift Plotter
//!
//! Extracts beam-drift calibration measurements from a JMAN logfile written
//! by an EBPG lithography tool (logfile layouts of beams v9_14 to v9_16) and
//! plots calibration block positions relative to the wafer center alongside
//! the drift-rate time series.

use env_logger::Builder;
use log::{LevelFilter, info};

use crate::ui::AppState;

mod parser;
mod ui;

fn main() {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("ebpg_drift_plotter"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default(),
        ..Default::default()
    };
    let _ = eframe::run_native(
        "EBPG Beam Drift Plotter",
        native_options,
        Box::new(|cc| Ok(Box::new(AppState::new(cc.storage)))),
    );
}
