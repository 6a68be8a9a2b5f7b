//! Parser module for EBPG JMAN logfiles.
//!
//! Implements the full extraction pipeline:
//! - `log_loader`: file reading and `JMAN LOGFILE` header validation
//! - `scanner`: single-pass line scanning with four independent patterns
//! - `timeline`: timestamp reconstruction with midnight-rollover correction
//! - `positions`: calibration block sorting and wafer-relative coordinates
//! - `report`: pipeline orchestration into a plot-ready [`DriftReport`]

pub mod log_loader;
pub mod positions;
pub mod report;
pub mod scanner;
pub mod timeline;
pub mod types;

use std::path::Path;

use anyhow::Context;

pub use report::{DriftExtremes, DriftReport};
pub use types::{CalibrationBlock, DriftSample, LogfileError, RelativeBlock, RunMetadata, WaferGeometry};

/// Load, validate, and parse a logfile into a [`DriftReport`].
pub fn load_report(path: &Path) -> anyhow::Result<DriftReport> {
    let content = log_loader::load_logfile(path)?;
    let report = DriftReport::build(path, &content).with_context(|| format!("while parsing {}", path.display()))?;
    Ok(report)
}
