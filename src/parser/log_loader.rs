//! Logfile loading and header validation.
//!
//! The job-management process ("JMAN") on EBPG tools writes a plain-text
//! logfile whose first line carries the literal marker `JMAN LOGFILE`. Any
//! file without that marker is rejected before a single pattern is matched,
//! so the scanner never runs over arbitrary text files.

use std::fs;
use std::path::Path;

use super::types::LogfileError;

/// Marker that must appear in the first line of every valid logfile.
pub const LOGFILE_MARKER: &str = "JMAN LOGFILE";

/// Read the full content of a logfile and validate its header line.
///
/// # Parameters
///
/// * `path` - Path to the `.log` file selected by the user
///
/// # Returns
///
/// The full file content on success, [`LogfileError::FileReadError`] if the
/// file cannot be read, [`LogfileError::InvalidHeader`] if the first line
/// does not contain the `JMAN LOGFILE` marker.
pub fn load_logfile(path: &Path) -> Result<String, LogfileError> {
    let content = fs::read_to_string(path).map_err(|e| LogfileError::FileReadError(e.to_string()))?;
    validate_header(&content)?;
    Ok(content)
}

/// Check that the first line of the content carries the logfile marker.
pub fn validate_header(content: &str) -> Result<(), LogfileError> {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.contains(LOGFILE_MARKER) {
        Ok(())
    } else {
        Err(LogfileError::InvalidHeader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_header() {
        let content = "EBPG5200 JMAN LOGFILE v9_15\nsome other line\n";
        assert!(validate_header(content).is_ok());
    }

    #[test]
    fn test_invalid_header() {
        let content = "SOME OTHER HEADER\ncal drift 12:00 ; 1_nm,1_nm 0.1_nm/min,0.1_nm/min\n";
        assert!(matches!(validate_header(content), Err(LogfileError::InvalidHeader)));
    }

    #[test]
    fn test_marker_only_checked_on_first_line() {
        let content = "header without marker\nJMAN LOGFILE\n";
        assert!(matches!(validate_header(content), Err(LogfileError::InvalidHeader)));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(validate_header(""), Err(LogfileError::InvalidHeader)));
    }
}
