//! Timestamp reconstruction for drift calibration lines.
//!
//! `cal drift` lines only record an hour and a minute. The full timestamp is
//! rebuilt from the most recent date line seen in the file, with a rolling
//! day-offset counter to correct for logs that cross midnight: whenever a
//! candidate time of day is earlier than the previously emitted timestamp,
//! the offset grows by one day. The resulting sequence is monotonically
//! non-decreasing even across several midnight crossings, as long as the
//! gap between consecutive samples stays below 24 hours (shorter gaps are
//! the only ones a bare HH:MM field can disambiguate).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::types::LogfileError;

/// Parse the calendar components of an RFC-822-style date line
/// (e.g. year "2024", month "Nov", day "14") into a `NaiveDate`.
pub fn parse_run_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{} {} {}", year, month, day), "%Y %b %d").ok()
}

/// Rebuilds absolute timestamps from bare HH:MM fields.
#[derive(Debug, Default)]
pub struct TimestampReconstructor {
    /// Calendar date from the most recent date line, if any.
    date_context: Option<NaiveDate>,
    /// Accumulated midnight crossings, in days.
    day_offset: i64,
    /// Previously emitted timestamp, the monotonicity cursor.
    previous: Option<NaiveDateTime>,
}

impl TimestampReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the rolling date context from a freshly matched date line.
    ///
    /// A changed calendar date already carries any day advance, so the
    /// accumulated rollover offset is cleared; keeping it would apply the
    /// advance twice.
    pub fn set_date_context(&mut self, date: NaiveDate) {
        if self.date_context != Some(date) {
            self.day_offset = 0;
        }
        self.date_context = Some(date);
    }

    pub fn has_date_context(&self) -> bool {
        self.date_context.is_some()
    }

    /// Build the timestamp for a drift line matched at `line_number` with the
    /// given hour and minute (seconds are fixed to zero).
    ///
    /// Fails if no date line has been seen yet, or if the hour/minute pair is
    /// out of range (the drift pattern matches any digit run, so `25:99`
    /// would reach this point).
    pub fn reconstruct(&mut self, line_number: usize, hour: u32, minute: u32) -> Result<NaiveDateTime, LogfileError> {
        let date = self.date_context.ok_or(LogfileError::MissingDateContext { line_number })?;

        let time_of_day = date
            .and_hms_opt(hour, minute, 0)
            .ok_or(LogfileError::InvalidTimeOfDay { line_number, hour, minute })?;

        let mut candidate = time_of_day + Duration::days(self.day_offset);

        // Midnight rollover: a step backwards in time means the log crossed
        // into the next calendar day.
        if let Some(previous) = self.previous {
            while candidate < previous {
                self.day_offset += 1;
                candidate += Duration::days(1);
            }
        }

        self.previous = Some(candidate);
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstructor_for(year: i32, month: u32, day: u32) -> TimestampReconstructor {
        let mut r = TimestampReconstructor::new();
        r.set_date_context(NaiveDate::from_ymd_opt(year, month, day).unwrap());
        r
    }

    #[test]
    fn test_parse_run_date() {
        let date = parse_run_date("2024", "Nov", "14").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 11, 14).unwrap());
    }

    #[test]
    fn test_parse_run_date_rejects_bad_month() {
        assert!(parse_run_date("2024", "Nvv", "14").is_none());
    }

    #[test]
    fn test_same_day_sequence() {
        let mut r = reconstructor_for(2024, 11, 14);
        let t1 = r.reconstruct(10, 17, 30).unwrap();
        let t2 = r.reconstruct(20, 18, 15).unwrap();
        assert_eq!((t2 - t1).num_minutes(), 45);
    }

    #[test]
    fn test_midnight_rollover_is_four_minutes() {
        let mut r = reconstructor_for(2024, 11, 14);
        let t1 = r.reconstruct(10, 23, 58).unwrap();
        let t2 = r.reconstruct(20, 0, 2).unwrap();
        assert_eq!((t2 - t1).num_minutes(), 4);
        assert_eq!(t2.date(), NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
    }

    #[test]
    fn test_two_midnight_crossings() {
        let mut r = reconstructor_for(2024, 11, 14);
        let t1 = r.reconstruct(10, 22, 0).unwrap();
        let t2 = r.reconstruct(20, 10, 0).unwrap(); // day 15
        let t3 = r.reconstruct(30, 23, 30).unwrap(); // day 15
        let t4 = r.reconstruct(40, 1, 0).unwrap(); // day 16
        assert!(t1 < t2 && t2 < t3 && t3 < t4);
        assert_eq!(t4.date(), NaiveDate::from_ymd_opt(2024, 11, 16).unwrap());
    }

    #[test]
    fn test_new_date_line_after_rollover_resets_offset() {
        let mut r = reconstructor_for(2024, 11, 14);
        r.reconstruct(10, 23, 58).unwrap();
        let t2 = r.reconstruct(20, 0, 2).unwrap();
        // The logfile itself announces the new day; the rollover offset must
        // not be applied on top of it.
        r.set_date_context(NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
        let t3 = r.reconstruct(30, 1, 0).unwrap();
        assert_eq!((t3 - t2).num_minutes(), 58);
        assert_eq!(t3.date(), NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
    }

    #[test]
    fn test_repeated_date_line_keeps_offset() {
        let mut r = reconstructor_for(2024, 11, 14);
        r.reconstruct(10, 23, 58).unwrap();
        let t2 = r.reconstruct(20, 0, 2).unwrap();
        // A stale date line repeating the old date leaves the offset alone.
        r.set_date_context(NaiveDate::from_ymd_opt(2024, 11, 14).unwrap());
        let t3 = r.reconstruct(30, 0, 30).unwrap();
        assert_eq!((t3 - t2).num_minutes(), 28);
        assert_eq!(t3.date(), NaiveDate::from_ymd_opt(2024, 11, 15).unwrap());
    }

    #[test]
    fn test_missing_date_context() {
        let mut r = TimestampReconstructor::new();
        let err = r.reconstruct(5, 12, 0).unwrap_err();
        assert!(matches!(err, LogfileError::MissingDateContext { line_number: 5 }));
    }

    #[test]
    fn test_invalid_time_of_day() {
        let mut r = reconstructor_for(2024, 11, 14);
        let err = r.reconstruct(7, 25, 99).unwrap_err();
        assert!(matches!(err, LogfileError::InvalidTimeOfDay { hour: 25, minute: 99, .. }));
    }
}
