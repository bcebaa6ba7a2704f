//! Availability windows.
//!
//! The user's free time is a set of minute intervals on a single timeline.
//! Windows may arrive unsorted, overlapping, or partly outside the horizon;
//! [`Availability`] normalizes them before the model is built.
//!
//! # Time Model
//! All times are whole minutes from the start of the horizon (midnight for a
//! single-day plan).

use serde::{Deserialize, Serialize};

/// A time interval [start, end) in minutes.
///
/// Half-open interval: includes start, excludes end. A task of length `d`
/// fits when `start <= s` and `s + d <= end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeWindow {
    /// Interval start (minutes, inclusive).
    pub start: i64,
    /// Interval end (minutes, exclusive).
    pub end: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length of this window (minutes).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `[start, end)` lies entirely inside this window.
    #[inline]
    pub fn encloses(&self, start: i64, end: i64) -> bool {
        start >= self.start && end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Latest start at which a block of `duration` still fits, if any.
    pub fn latest_start(&self, duration: i64) -> Option<i64> {
        let latest = self.end.saturating_sub(duration);
        (latest >= self.start).then_some(latest)
    }
}

/// A normalized set of availability windows.
///
/// Windows are clipped to `[0, horizon]`, empty remnants are dropped, and
/// the rest are sorted by start. Overlapping windows are merged only on
/// request ([`Availability::merged`]): merging lets a task straddle what the
/// caller entered as two separate windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    windows: Vec<TimeWindow>,
}

impl Availability {
    /// Normalizes raw windows against a horizon.
    pub fn new(windows: impl IntoIterator<Item = TimeWindow>, horizon: i64) -> Self {
        let mut windows: Vec<TimeWindow> = windows
            .into_iter()
            .map(|w| TimeWindow::new(w.start.max(0), w.end.min(horizon)))
            .filter(|w| w.start < w.end)
            .collect();
        windows.sort();
        Self { windows }
    }

    /// Merges overlapping windows (touching windows stay separate).
    pub fn merged(self) -> Self {
        let mut out: Vec<TimeWindow> = Vec::with_capacity(self.windows.len());
        for w in self.windows {
            match out.last_mut() {
                Some(last) if last.overlaps(&w) => last.end = last.end.max(w.end),
                _ => out.push(w),
            }
        }
        Self { windows: out }
    }

    /// Normalized windows, sorted by start.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    /// Whether no usable window remains.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Longest single window (minutes).
    pub fn longest(&self) -> i64 {
        self.windows.iter().map(TimeWindow::duration).max().unwrap_or(0)
    }

    /// The window enclosing `[start, end)`, if one exists.
    pub fn enclosing(&self, start: i64, end: i64) -> Option<&TimeWindow> {
        self.windows.iter().find(|w| w.encloses(start, end))
    }
}
