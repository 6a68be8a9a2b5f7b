// UI module for the EBPG Beam Drift Plotter
//
// This module organizes the UI into separate components:
// - `app_state`: application state, file selection, and main update loop
// - `position_panel`: central scatter plot of wafer-relative block positions
// - `drift_panel`: bottom time-series plot of drift rates
// - `summary_panel`: right panel with run metadata and the position table

pub mod app_state;
pub mod drift_panel;
pub mod position_panel;
pub mod summary_panel;

pub use app_state::AppState;
