//! Full parsing pipeline producing a plot-ready drift report.

use std::path::{Path, PathBuf};

use log::info;

use super::positions::relative_positions;
use super::scanner::{LineScanner, ScanResult};
use super::types::{DriftSample, LogfileError, RelativeBlock, RunMetadata, WaferGeometry};

/// Min/max drift rates per axis, selected by magnitude: "min" is the sample
/// closest to zero, "max" the farthest, both reported with their sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftExtremes {
    pub min_dx: f64,
    pub max_dx: f64,
    pub min_dy: f64,
    pub max_dy: f64,
}

impl DriftExtremes {
    /// Select per-axis extremes from a non-empty sample list.
    fn from_samples(samples: &[DriftSample]) -> Self {
        let (min_dx, max_dx) = extremes_by_magnitude(samples.iter().map(|s| s.dx_rate));
        let (min_dy, max_dy) = extremes_by_magnitude(samples.iter().map(|s| s.dy_rate));
        Self { min_dx, max_dx, min_dy, max_dy }
    }
}

/// Find the values closest to and farthest from zero. Ties keep the earliest
/// sample. Returns (0, 0) for an empty iterator.
fn extremes_by_magnitude(mut values: impl Iterator<Item = f64>) -> (f64, f64) {
    let Some(first) = values.next() else {
        return (0.0, 0.0);
    };
    values.fold((first, first), |(min, max), v| {
        let min = if v.abs() < min.abs() { v } else { min };
        let max = if v.abs() > max.abs() { v } else { max };
        (min, max)
    })
}

/// Everything the renderer needs from one parsed logfile.
#[derive(Debug)]
pub struct DriftReport {
    /// Path of the source logfile.
    pub source_path: PathBuf,
    /// Wafer geometry (center reference and plot bounds).
    pub geometry: WaferGeometry,
    /// Run date and start time for the time-series plot title.
    pub metadata: RunMetadata,
    /// Drift-rate samples with reconstructed timestamps.
    pub samples: Vec<DriftSample>,
    /// Calibration block positions relative to the wafer center, sorted.
    pub relative_blocks: Vec<RelativeBlock>,
    /// Min/max drift rates by magnitude, per axis.
    pub extremes: DriftExtremes,
}

impl DriftReport {
    /// Run the scan → validate → normalize pipeline over header-validated
    /// logfile content.
    pub fn build(path: &Path, content: &str) -> Result<Self, LogfileError> {
        let scan: ScanResult = LineScanner::new().scan(content)?;

        if scan.samples.is_empty() {
            return Err(LogfileError::NoDriftData);
        }

        let metadata = match scan.metadata {
            Some(metadata) => metadata,
            // Unreachable once samples is non-empty: reconstructing the first
            // sample required a date line, and the first date line also set
            // the run metadata.
            None => return Err(LogfileError::MissingDateContext { line_number: 0 }),
        };

        let geometry = scan.geometry.ok_or(LogfileError::MissingWaferGeometry)?;
        let relative_blocks = relative_positions(&scan.blocks, &geometry);
        let extremes = DriftExtremes::from_samples(&scan.samples);

        Ok(Self {
            source_path: path.to_path_buf(),
            geometry,
            metadata,
            samples: scan.samples,
            relative_blocks,
            extremes,
        })
    }

    /// Minutes elapsed since the first sample, one entry per sample.
    pub fn elapsed_minutes(&self) -> Vec<f64> {
        let Some(first) = self.samples.first() else {
            return Vec::new();
        };
        self.samples
            .iter()
            .map(|s| (s.timestamp - first.timestamp).num_seconds() as f64 / 60.0)
            .collect()
    }

    /// The min/max summary block, identical in the console and in the plot.
    pub fn summary_text(&self) -> String {
        format!(
            "X Min/Max: {:.2} / {:.2} nm\nY Min/Max: {:.2} / {:.2} nm",
            self.extremes.min_dx, self.extremes.max_dx, self.extremes.min_dy, self.extremes.max_dy
        )
    }

    /// Print the relative position listing and the summary to the console.
    pub fn log_summary(&self) {
        info!("Relative Drift Calibration Positions");
        for block in &self.relative_blocks {
            info!("Relative X: {}, Relative Y: {}", block.rel_x_mm, block.rel_y_mm);
        }
        info!("For logfile name: {}\n{}", self.source_path.display(), self.summary_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_LOG: &str = "\
EBPG5200 JMAN LOGFILE v9_15
Thu Nov 14 17:30:26 AEST 2024
jman: jobload --centre=50000,50000 --radius=50000 --size=100000,100000
block: 2  Abs coord: 60.0_mm,40.0_mm
block: 1  Abs coord: 45.0_mm,55.0_mm
cal drift 23:58 ; 10.0_nm,3.0_nm -5.0_nm/min,2.5_nm/min
cal drift 0:02 ; 11.0_nm,2.0_nm 3.2_nm/min,-0.3_nm/min
cal drift 0:10 ; 12.0_nm,1.0_nm -1.1_nm/min,0.9_nm/min
";

    #[test]
    fn test_pipeline_end_to_end() {
        let report = DriftReport::build(Path::new("fixture.log"), FIXTURE_LOG).unwrap();

        assert_eq!(report.metadata.date, "2024-Nov-14");
        assert_eq!(report.metadata.start_time, "17:30:26");
        assert_eq!(report.geometry.center_x_mm, 50.0);
        assert_eq!(report.samples.len(), 3);

        // Blocks sorted by number, positions relative to the 50/50 center
        assert_eq!(report.relative_blocks[0].block_number, 1);
        assert_eq!(report.relative_blocks[0].rel_x_mm, -5.0);
        assert_eq!(report.relative_blocks[0].rel_y_mm, 5.0);
        assert_eq!(report.relative_blocks[1].block_number, 2);
        assert_eq!(report.relative_blocks[1].rel_x_mm, 10.0);
        assert_eq!(report.relative_blocks[1].rel_y_mm, -10.0);
    }

    #[test]
    fn test_elapsed_minutes_spans_midnight() {
        let report = DriftReport::build(Path::new("fixture.log"), FIXTURE_LOG).unwrap();
        assert_eq!(report.elapsed_minutes(), vec![0.0, 4.0, 12.0]);
    }

    #[test]
    fn test_extremes_are_selected_by_magnitude() {
        let report = DriftReport::build(Path::new("fixture.log"), FIXTURE_LOG).unwrap();
        // dx rates: [-5.0, 3.2, -1.1] -> min is -1.1 (closest to zero), max is -5.0
        assert_eq!(report.extremes.min_dx, -1.1);
        assert_eq!(report.extremes.max_dx, -5.0);
        // dy rates: [2.5, -0.3, 0.9] -> min is -0.3, max is 2.5
        assert_eq!(report.extremes.min_dy, -0.3);
        assert_eq!(report.extremes.max_dy, 2.5);
    }

    #[test]
    fn test_summary_text_format() {
        let report = DriftReport::build(Path::new("fixture.log"), FIXTURE_LOG).unwrap();
        assert_eq!(report.summary_text(), "X Min/Max: -1.10 / -5.00 nm\nY Min/Max: -0.30 / 2.50 nm");
    }

    #[test]
    fn test_no_drift_lines_is_fatal() {
        let content = "EBPG5200 JMAN LOGFILE v9_15\nThu Nov 14 17:30:26 AEST 2024\n";
        let err = DriftReport::build(Path::new("empty.log"), content).unwrap_err();
        assert!(matches!(err, LogfileError::NoDriftData));
    }

    #[test]
    fn test_missing_wafer_centre_is_fatal() {
        let content = "\
EBPG5200 JMAN LOGFILE v9_15
Thu Nov 14 17:30:26 AEST 2024
block: 1  Abs coord: 45.0_mm,55.0_mm
cal drift 18:00 ; 0_nm,0_nm 1.0_nm/min,1.0_nm/min
";
        let err = DriftReport::build(Path::new("nocentre.log"), content).unwrap_err();
        assert!(matches!(err, LogfileError::MissingWaferGeometry));
    }
}
