//! Type definitions for the logfile parsing pipeline.

use chrono::NaiveDateTime;

/// Wafer geometry extracted from a `--centre=...,--size=...` command line.
///
/// The logfile records these values in micrometers; they are converted to
/// millimeters (divide by 1000) at capture time, so every field here is in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaferGeometry {
    /// Absolute wafer center, x component (mm).
    pub center_x_mm: f64,
    /// Absolute wafer center, y component (mm).
    pub center_y_mm: f64,
    /// Wafer extent along x (mm).
    pub size_x_mm: f64,
    /// Wafer extent along y (mm).
    pub size_y_mm: f64,
}

/// A single drift-calibration measurement from a `cal drift HH:MM ; ...` line.
///
/// The logfile only records hour and minute for these lines; the full
/// timestamp is reconstructed from the rolling date context (see
/// [`crate::parser::timeline`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftSample {
    /// Reconstructed absolute timestamp (seconds fixed to zero).
    pub timestamp: NaiveDateTime,
    /// Beam drift rate along x (nm/min).
    pub dx_rate: f64,
    /// Beam drift rate along y (nm/min).
    pub dy_rate: f64,
}

/// A calibration block position in absolute stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBlock {
    pub block_number: u32,
    /// Absolute x coordinate (mm).
    pub x_mm: f64,
    /// Absolute y coordinate (mm).
    pub y_mm: f64,
}

/// A calibration block position expressed relative to the wafer center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeBlock {
    pub block_number: u32,
    /// x offset from the wafer center (mm).
    pub rel_x_mm: f64,
    /// y offset from the wafer center (mm).
    pub rel_y_mm: f64,
}

/// Date and start time of the exposure run, captured from the first
/// RFC-822-style date line in the logfile.
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetadata {
    /// Human-readable run date, e.g. "2024-Nov-14".
    pub date: String,
    /// Run start time of day, e.g. "17:30:26".
    pub start_time: String,
}

/// Error type for logfile loading and parsing failures.
#[derive(Debug)]
pub enum LogfileError {
    /// The file could not be read from disk.
    FileReadError(String),
    /// The first line does not carry the `JMAN LOGFILE` marker.
    InvalidHeader,
    /// The file is a valid JMAN logfile but contains no drift calibration lines.
    NoDriftData,
    /// A drift calibration line appeared before any date line, so no calendar
    /// context exists to reconstruct its timestamp.
    MissingDateContext { line_number: usize },
    /// A drift line carried an hour/minute pair outside the valid range.
    InvalidTimeOfDay { line_number: usize, hour: u32, minute: u32 },
    /// Calibration block positions were found but no wafer-centre line, so
    /// relative positions cannot be computed.
    MissingWaferGeometry,
}

impl std::fmt::Display for LogfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogfileError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            LogfileError::InvalidHeader => write!(f, "This is not a valid EBPG logfile"),
            LogfileError::NoDriftData => write!(f, "Log file is correct, but it contains no drift calibration points"),
            LogfileError::MissingDateContext { line_number } => {
                write!(f, "Drift calibration line {} appears before any date line", line_number)
            }
            LogfileError::InvalidTimeOfDay { line_number, hour, minute } => {
                write!(f, "Line {}: invalid time of day {:02}:{:02}", line_number, hour, minute)
            }
            LogfileError::MissingWaferGeometry => {
                write!(f, "No wafer-centre line found; cannot compute relative positions")
            }
        }
    }
}

impl std::error::Error for LogfileError {}
