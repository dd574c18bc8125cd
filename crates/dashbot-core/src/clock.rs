//! Session wall-clock time.
//!
//! Session timestamps are local wall-clock strings in a single fixed zone
//! (Asia/Bangkok, UTC+07:00, no DST) with no embedded offset. Both ends of a
//! duration are interpreted in that same zone.

use chrono::{FixedOffset, NaiveDateTime, Utc};

use dashbot_types::session::{DurationOutcome, SESSION_TIME_FORMAT, SessionDuration};

/// Offset of the session zone from UTC, in seconds.
pub const SESSION_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// The fixed zone all session timestamps are written and read in.
pub fn session_zone() -> FixedOffset {
    FixedOffset::east_opt(SESSION_UTC_OFFSET_SECS).expect("UTC+7 is a valid offset")
}

/// Source of the current wall-clock time in the session zone.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The real clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    zone: FixedOffset,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            zone: session_zone(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.zone).naive_local()
    }
}

/// Format a wall-clock time as a session timestamp (seconds precision).
pub fn format_session_time(time: NaiveDateTime) -> String {
    time.format(SESSION_TIME_FORMAT).to_string()
}

pub fn parse_session_time(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, SESSION_TIME_FORMAT)
}

/// Measure the time between two session timestamps.
///
/// A negative span yields [`DurationOutcome::InvalidTimeRange`]; an
/// unreadable timestamp yields [`DurationOutcome::Unparseable`].
pub fn measure_duration(start: &str, end: &str) -> DurationOutcome {
    let zone = session_zone();

    let start_local = match parse_session_time(start) {
        Ok(t) => t.and_local_timezone(zone).single(),
        Err(e) => {
            return DurationOutcome::Unparseable {
                reason: format!("start time '{start}': {e}"),
            };
        }
    };
    let end_local = match parse_session_time(end) {
        Ok(t) => t.and_local_timezone(zone).single(),
        Err(e) => {
            return DurationOutcome::Unparseable {
                reason: format!("end time '{end}': {e}"),
            };
        }
    };

    let (Some(start_local), Some(end_local)) = (start_local, end_local) else {
        return DurationOutcome::Unparseable {
            reason: "timestamp does not map to a single instant".to_string(),
        };
    };

    let seconds = (end_local - start_local).num_seconds();
    if seconds < 0 {
        DurationOutcome::InvalidTimeRange
    } else {
        DurationOutcome::Measured(SessionDuration::from_seconds(seconds as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_format_has_no_offset() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        assert_eq!(format_session_time(t), "2024-01-01 09:05:07");
    }

    #[test]
    fn test_system_clock_is_utc_plus_seven() {
        let utc_before = Utc::now().naive_utc();
        let local = SystemClock::new().now();
        let diff = (local - utc_before).num_seconds();
        // Allow a little slack for the time between the two reads.
        assert!((7 * 3600..=7 * 3600 + 5).contains(&diff), "diff was {diff}");
    }

    #[test]
    fn test_session_zone_converts_utc_midnight() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let local = utc.with_timezone(&session_zone()).naive_local();
        assert_eq!(format_session_time(local), "2024-01-01 07:00:00");
    }

    #[test]
    fn test_measure_one_hour_twenty_three() {
        let outcome = measure_duration("2024-01-01 10:00:00", "2024-01-01 11:23:00");
        assert_eq!(
            outcome,
            DurationOutcome::Measured(SessionDuration { hours: 1, minutes: 23 })
        );
        assert_eq!(outcome.to_string(), "1 hour 23 minutes");
    }

    #[test]
    fn test_measure_across_midnight() {
        let outcome = measure_duration("2024-01-01 23:50:00", "2024-01-02 01:10:30");
        assert_eq!(
            outcome,
            DurationOutcome::Measured(SessionDuration { hours: 1, minutes: 20 })
        );
    }

    #[test]
    fn test_measure_zero_length() {
        let outcome = measure_duration("2024-01-01 10:00:00", "2024-01-01 10:00:59");
        assert_eq!(
            outcome,
            DurationOutcome::Measured(SessionDuration { hours: 0, minutes: 0 })
        );
    }

    #[test]
    fn test_measure_negative_is_invalid_range() {
        let outcome = measure_duration("2024-01-01 12:00:00", "2024-01-01 11:59:00");
        assert_eq!(outcome, DurationOutcome::InvalidTimeRange);
    }

    #[test]
    fn test_measure_unparseable_start() {
        let outcome = measure_duration("yesterday", "2024-01-01 11:59:00");
        assert!(matches!(outcome, DurationOutcome::Unparseable { .. }));
    }

    #[test]
    fn test_measure_rejects_offset_suffix() {
        let outcome = measure_duration("2024-01-01 10:00:00+07:00", "2024-01-01 11:00:00");
        assert!(matches!(outcome, DurationOutcome::Unparseable { .. }));
    }
}
