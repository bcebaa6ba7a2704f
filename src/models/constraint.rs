//! Break spacing between consecutive tasks.
//!
//! # Modes
//!
//! - **Hard**: the gap is a solver constraint. Every pair of consecutive
//!   tasks (by start time) must be separated by at least `duration` minutes.
//! - **Soft**: the solver ignores the gap. A break is shown in the output
//!   only where the chosen placement already leaves room for it.

use serde::{Deserialize, Serialize};

/// Whether the break gap constrains the search.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreakMode {
    /// Enforced by the solver.
    #[default]
    Hard,
    /// Advisory; inserted only where the natural gap allows.
    Soft,
}

/// Break rule applied between consecutive scheduled tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BreakPolicy {
    /// Break length in minutes (>= 0).
    pub duration: i64,
    /// Hard or soft enforcement.
    pub mode: BreakMode,
}

impl BreakPolicy {
    /// No breaks.
    pub fn none() -> Self {
        Self::default()
    }

    /// Breaks enforced by the solver.
    pub fn hard(duration: i64) -> Self {
        Self {
            duration,
            mode: BreakMode::Hard,
        }
    }

    /// Breaks inserted only where the schedule leaves room.
    pub fn soft(duration: i64) -> Self {
        Self {
            duration,
            mode: BreakMode::Soft,
        }
    }

    /// Minimum gap the solver must keep between consecutive tasks.
    #[inline]
    pub fn min_gap(&self) -> i64 {
        match self.mode {
            BreakMode::Hard => self.duration.max(0),
            BreakMode::Soft => 0,
        }
    }

    /// Whether a break entry belongs in a gap of `gap` minutes.
    ///
    /// Zero-length breaks are never emitted.
    pub fn fits_break(&self, gap: i64) -> bool {
        self.duration > 0 && gap >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_gap_by_mode() {
        assert_eq!(BreakPolicy::hard(10).min_gap(), 10);
        assert_eq!(BreakPolicy::soft(10).min_gap(), 0);
        assert_eq!(BreakPolicy::none().min_gap(), 0);
    }

    #[test]
    fn test_fits_break() {
        let p = BreakPolicy::soft(15);
        assert!(p.fits_break(15));
        assert!(p.fits_break(40));
        assert!(!p.fits_break(14));
        assert!(!BreakPolicy::none().fits_break(30));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&BreakPolicy::soft(5)).unwrap();
        assert_eq!(json, r#"{"duration":5,"mode":"soft"}"#);

        let p: BreakPolicy = serde_json::from_str(r#"{"duration":10}"#).unwrap();
        assert_eq!(p, BreakPolicy::hard(10));
    }
}
