//! Clock-string conversions.
//!
//! Converts 24-hour `HH:MM` strings to minute offsets from midnight and back,
//! and turns user-entered `(start, end)` clock pairs into [`TimeWindow`]s.
//!
//! # Format
//! Only the zero-padded form is accepted (`"09:05"`, not `"9:5"`), so that
//! `format_clock(parse_clock(s)?) == s` for every accepted string. `24:00`
//! is rejected; windows that run to the end of the day use `23:59` or are
//! built directly in minutes.

use chrono::{NaiveTime, Timelike};

use crate::error::{PlanError, PlanResult};
use crate::models::TimeWindow;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Parses `HH:MM` into minutes since midnight.
///
/// # Errors
/// [`PlanError::InvalidTimeFormat`] on a wrong separator, missing zero
/// padding, non-digit characters, or an out-of-range hour or minute.
///
/// ```
/// use u_timetable::clock::parse_clock;
///
/// assert_eq!(parse_clock("09:30").unwrap(), 570);
/// assert!(parse_clock("9:30").is_err());
/// assert!(parse_clock("12.30").is_err());
/// ```
pub fn parse_clock(text: &str) -> PlanResult<i64> {
    let invalid = || PlanError::InvalidTimeFormat {
        input: text.to_string(),
    };

    let bytes = text.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }

    let time = NaiveTime::parse_from_str(text, "%H:%M").map_err(|_| invalid())?;
    Ok(i64::from(time.hour() * 60 + time.minute()))
}

/// Formats minutes as zero-padded `HH:MM`.
///
/// Values outside one day wrap modulo 24 hours (`1500` renders as `01:00`,
/// `-30` as `23:30`), matching the plain clock rendering used for display.
pub fn format_clock(minutes: i64) -> String {
    let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Converts `(start, end)` clock pairs into windows sorted by start.
///
/// # Errors
/// - [`PlanError::InvalidTimeFormat`] if either side fails [`parse_clock`].
/// - [`PlanError::InvalidWindow`] if `start >= end`.
pub fn normalize_windows<S, E>(raw_windows: &[(S, E)]) -> PlanResult<Vec<TimeWindow>>
where
    S: AsRef<str>,
    E: AsRef<str>,
{
    let mut windows = raw_windows
        .iter()
        .map(|(start, end)| {
            let start = parse_clock(start.as_ref())?;
            let end = parse_clock(end.as_ref())?;
            if start >= end {
                return Err(PlanError::InvalidWindow { start, end });
            }
            Ok(TimeWindow::new(start, end))
        })
        .collect::<PlanResult<Vec<_>>>()?;
    windows.sort();
    Ok(windows)
}

/// A single window that opens at `start_text` and lasts `total_minutes`.
///
/// The end may pass midnight; the planner clips it to the horizon.
pub fn window_from_budget(start_text: &str, total_minutes: i64) -> PlanResult<TimeWindow> {
    let start = parse_clock(start_text)?;
    let end = start + total_minutes;
    if total_minutes <= 0 {
        return Err(PlanError::InvalidWindow { start, end });
    }
    Ok(TimeWindow::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_valid() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("09:00").unwrap(), 540);
        assert_eq!(parse_clock("13:45").unwrap(), 825);
        assert_eq!(parse_clock("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_clock_rejects_malformed() {
        for bad in [
            "", "9:00", "09:0", "0900", "09-00", "09.00", "ab:cd", "24:00", "12:60", " 9:00",
            "09:00 ", "+9:00", "-1:00",
        ] {
            assert!(
                matches!(parse_clock(bad), Err(PlanError::InvalidTimeFormat { .. })),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(545), "09:05");
        assert_eq!(format_clock(1439), "23:59");
    }

    #[test]
    fn test_format_clock_wraps() {
        assert_eq!(format_clock(1440), "00:00");
        assert_eq!(format_clock(1500), "01:00");
        assert_eq!(format_clock(-30), "23:30");
    }

    #[test]
    fn test_round_trip_every_minute() {
        for minute in 0..MINUTES_PER_DAY {
            let text = format_clock(minute);
            assert_eq!(parse_clock(&text).unwrap(), minute);
            assert_eq!(format_clock(parse_clock(&text).unwrap()), text);
        }
    }

    #[test]
    fn test_normalize_windows_sorts() {
        let windows = normalize_windows(&[("14:00", "16:00"), ("09:00", "10:00")]).unwrap();
        assert_eq!(
            windows,
            vec![TimeWindow::new(540, 600), TimeWindow::new(840, 960)]
        );
    }

    #[test]
    fn test_normalize_windows_rejects_inverted() {
        let err = normalize_windows(&[("10:00", "09:00")]).unwrap_err();
        assert!(matches!(
            err,
            PlanError::InvalidWindow {
                start: 600,
                end: 540
            }
        ));

        let err = normalize_windows(&[("10:00", "10:00")]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidWindow { .. }));
    }

    #[test]
    fn test_normalize_windows_bad_format() {
        let err = normalize_windows(&[("09:00".to_string(), "noon".to_string())]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidTimeFormat { input } if input == "noon"));
    }

    #[test]
    fn test_window_from_budget() {
        assert_eq!(
            window_from_budget("09:00", 240).unwrap(),
            TimeWindow::new(540, 780)
        );
        assert!(window_from_budget("09:00", 0).is_err());
        assert!(window_from_budget("9am", 60).is_err());
    }
}
