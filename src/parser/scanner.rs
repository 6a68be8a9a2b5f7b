//! Single-pass line scanner for JMAN logfiles.
//!
//! Applies four independent patterns to every line (a line may match more
//! than one) and accumulates four result streams:
//! - wafer geometry from `--centre=...,--size=...` command lines
//! - run metadata from RFC-822-style date lines
//! - drift-rate samples from `cal drift HH:MM ; ...` lines
//! - calibration block positions from `block: N  Abs coord: ...` lines
//!
//! Pattern coverage is tied to the logfile layout of beams v9_14 to v9_16;
//! other tool versions are out of scope.

use log::{info, warn};
use regex::Regex;

use super::timeline::{TimestampReconstructor, parse_run_date};
use super::types::{CalibrationBlock, DriftSample, LogfileError, RunMetadata, WaferGeometry};

/// All data collections accumulated by one scan pass.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Wafer geometry, if a wafer-centre line was matched (first match wins).
    pub geometry: Option<WaferGeometry>,
    /// Run date and start time, if a date line was matched (first match wins).
    pub metadata: Option<RunMetadata>,
    /// Drift-rate samples in order of appearance, timestamps reconstructed.
    pub samples: Vec<DriftSample>,
    /// Calibration block positions in order of appearance.
    pub blocks: Vec<CalibrationBlock>,
}

/// Line scanner with pre-compiled patterns.
pub struct LineScanner {
    wafer_centre: Regex,
    date: Regex,
    drift: Regex,
    block: Regex,
}

impl LineScanner {
    pub fn new() -> Self {
        // The patterns are fixed string literals, so compilation cannot fail.
        Self {
            wafer_centre: Regex::new(r"--centre=([0-9.-]+),([0-9.-]+).*--size=([0-9.-]+),([0-9.-]+)").unwrap(),
            date: Regex::new(r"^([A-Za-z]{3})\s([A-Za-z]{3})\s(\d{1,2})\s(\d{2}:\d{2}:\d{2})\s([A-Z]{3,4})\s(\d{4})").unwrap(),
            drift: Regex::new(r"cal drift (\d+):(\d+)\s*;\s*(-?\d+\.?\d*)_nm,(-?\d+\.?\d*)_nm\s+(-?\d+\.?\d*)_nm/min,(-?\d+\.?\d*)_nm/min").unwrap(),
            block: Regex::new(r"block:\s(\d+)\s+Abs\scoord:\s([-+]?[0-9]*\.?[0-9]+)_mm,([-+]?[0-9]*\.?[0-9]+)_mm").unwrap(),
        }
    }

    /// Scan the full logfile content in one pass.
    ///
    /// # Parameters
    ///
    /// * `content` - Full text of a header-validated logfile
    ///
    /// # Returns
    ///
    /// The accumulated [`ScanResult`], or a [`LogfileError`] if a drift line
    /// cannot be timestamped (no preceding date line, or an out-of-range
    /// hour/minute pair).
    pub fn scan(&self, content: &str) -> Result<ScanResult, LogfileError> {
        let mut result = ScanResult::default();
        let mut reconstructor = TimestampReconstructor::new();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;

            if let Some(caps) = self.wafer_centre.captures(line) {
                self.capture_geometry(&caps, line_number, &mut result);
            }

            if let Some(caps) = self.date.captures(line) {
                self.capture_date(&caps, line_number, &mut result, &mut reconstructor);
            }

            if let Some(caps) = self.drift.captures(line) {
                self.capture_drift(&caps, line_number, &mut result, &mut reconstructor)?;
            }

            if let Some(caps) = self.block.captures(line) {
                self.capture_block(&caps, line_number, &mut result);
            }
        }

        Ok(result)
    }

    /// Capture wafer geometry, converting micrometers to millimeters.
    fn capture_geometry(&self, caps: &regex::Captures<'_>, line_number: usize, result: &mut ScanResult) {
        let parsed: Option<[f64; 4]> = (1..=4)
            .map(|i| caps[i].parse::<f64>().ok())
            .collect::<Option<Vec<f64>>>()
            .and_then(|v| v.try_into().ok());

        let Some([centre_x, centre_y, size_x, size_y]) = parsed else {
            warn!("Line {}: wafer-centre line with unparsable numeric fields, skipping", line_number);
            return;
        };

        let geometry = WaferGeometry {
            center_x_mm: centre_x / 1000.0,
            center_y_mm: centre_y / 1000.0,
            size_x_mm: size_x / 1000.0,
            size_y_mm: size_y / 1000.0,
        };

        info!("Centre: ({}, {})", geometry.center_x_mm, geometry.center_y_mm);
        info!("Size: ({}, {})", geometry.size_x_mm, geometry.size_y_mm);

        if result.geometry.is_none() {
            result.geometry = Some(geometry);
        }
    }

    /// Capture run metadata (first date line wins) and keep the rolling date
    /// context current for timestamp reconstruction.
    fn capture_date(&self, caps: &regex::Captures<'_>, line_number: usize, result: &mut ScanResult, reconstructor: &mut TimestampReconstructor) {
        let (month, day, time, year) = (&caps[2], &caps[3], &caps[4], &caps[6]);

        match parse_run_date(year, month, day) {
            Some(date) => reconstructor.set_date_context(date),
            None => {
                warn!("Line {}: unrecognized calendar date '{} {} {}'", line_number, year, month, day);
                return;
            }
        }

        if result.metadata.is_none() {
            result.metadata = Some(RunMetadata {
                date: format!("{}-{}-{}", year, month, day),
                start_time: time.to_string(),
            });
        }
    }

    /// Capture a drift-rate sample. The two absolute `_nm` position fields
    /// (capture groups 3 and 4) are discarded; only the rates are kept.
    fn capture_drift(
        &self,
        caps: &regex::Captures<'_>,
        line_number: usize,
        result: &mut ScanResult,
        reconstructor: &mut TimestampReconstructor,
    ) -> Result<(), LogfileError> {
        let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            warn!("Line {}: drift line with unparsable time fields, skipping", line_number);
            return Ok(());
        };
        let (Ok(dx_rate), Ok(dy_rate)) = (caps[5].parse::<f64>(), caps[6].parse::<f64>()) else {
            warn!("Line {}: drift line with unparsable rate fields, skipping", line_number);
            return Ok(());
        };

        let timestamp = reconstructor.reconstruct(line_number, hour, minute)?;
        result.samples.push(DriftSample { timestamp, dx_rate, dy_rate });
        Ok(())
    }

    /// Capture a calibration block position (already in millimeters).
    fn capture_block(&self, caps: &regex::Captures<'_>, line_number: usize, result: &mut ScanResult) {
        let (Ok(block_number), Ok(x_mm), Ok(y_mm)) = (caps[1].parse::<u32>(), caps[2].parse::<f64>(), caps[3].parse::<f64>()) else {
            warn!("Line {}: block line with unparsable fields, skipping", line_number);
            return;
        };

        result.blocks.push(CalibrationBlock { block_number, x_mm, y_mm });
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}
