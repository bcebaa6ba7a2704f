//! Constraint model for single-timeline placement.
//!
//! One integer start variable per task. Each variable's domain is the
//! union, over availability windows, of the starts that keep the whole task
//! inside that window. The model also carries the minimum gap between
//! consecutive tasks (non-zero only for hard breaks) and the objective
//! weights.

use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

/// Candidate start times of one task, as sorted disjoint inclusive ranges.
///
/// Built by interval containment rather than value enumeration, so its size
/// is proportional to the number of windows, not the horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDomain {
    ranges: Vec<(i64, i64)>,
}

impl StartDomain {
    /// Domain of a task of `duration` minutes over `windows`, capped so the
    /// task ends no later than `horizon`.
    pub fn from_windows(windows: &[TimeWindow], duration: i64, horizon: i64) -> Self {
        let mut ranges: Vec<(i64, i64)> = windows
            .iter()
            .filter_map(|w| {
                let clipped = TimeWindow::new(w.start.max(0), w.end.min(horizon));
                clipped
                    .latest_start(duration)
                    .map(|latest| (clipped.start, latest))
            })
            .collect();
        ranges.sort_unstable();

        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ranges.len());
        for (lo, hi) in ranges {
            match merged.last_mut() {
                // Both ranges are sets of integers; adjacent ones union cleanly.
                Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        Self { ranges: merged }
    }

    /// Whether no start is possible.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Smallest allowed start.
    pub fn min(&self) -> Option<i64> {
        self.ranges.first().map(|r| r.0)
    }

    /// Largest allowed start.
    pub fn max(&self) -> Option<i64> {
        self.ranges.last().map(|r| r.1)
    }

    /// Number of allowed start values.
    pub fn size(&self) -> i64 {
        self.ranges
            .iter()
            .map(|(lo, hi)| hi.saturating_sub(*lo).saturating_add(1))
            .fold(0, i64::saturating_add)
    }

    /// Whether `start` is allowed.
    pub fn contains(&self, start: i64) -> bool {
        self.ranges
            .iter()
            .any(|&(lo, hi)| start >= lo && start <= hi)
    }

    /// Earliest allowed start at or after `t`.
    pub fn earliest_at_or_after(&self, t: i64) -> Option<i64> {
        self.ranges
            .iter()
            .find(|&&(_, hi)| hi >= t)
            .map(|&(lo, _)| lo.max(t))
    }

    /// The inclusive ranges.
    pub fn ranges(&self) -> &[(i64, i64)] {
        &self.ranges
    }
}

/// Decision variable for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVar {
    /// Task name.
    pub name: String,
    /// Priority label (carried through to the timetable).
    pub priority: String,
    /// Duration (minutes).
    pub duration: i64,
    /// Objective weight resolved from the priority label.
    pub weight: i64,
    /// Allowed start times.
    pub domain: StartDomain,
}

/// A complete placement model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpModel {
    /// Upper bound of the time axis (minutes).
    pub horizon: i64,
    /// Minimum idle minutes between consecutive tasks.
    pub min_gap: i64,
    /// Variables in input order.
    pub tasks: Vec<TaskVar>,
}

impl CpModel {
    /// Number of task variables.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Names of tasks whose domain is empty (they fit in no window).
    pub fn unplaceable(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|t| t.domain.is_empty())
            .map(|t| t.name.clone())
            .collect()
    }

    /// Objective to maximize: `sum(weight * (horizon - start))`.
    ///
    /// Saturates at `i64::MAX` rather than wrapping.
    pub fn objective(&self, starts: &[i64]) -> i64 {
        self.tasks
            .iter()
            .zip(starts)
            .map(|(t, &s)| t.weight.saturating_mul(self.horizon.saturating_sub(s)))
            .fold(0, i64::saturating_add)
    }

    /// Checks a full assignment against every hard constraint.
    ///
    /// Domain membership, pairwise no-overlap, and the minimum gap between
    /// consecutive tasks in start order.
    pub fn is_feasible(&self, starts: &[i64]) -> bool {
        if starts.len() != self.tasks.len() {
            return false;
        }
        if !self
            .tasks
            .iter()
            .zip(starts)
            .all(|(t, &s)| t.domain.contains(s))
        {
            return false;
        }

        let mut order: Vec<usize> = (0..starts.len()).collect();
        order.sort_by_key(|&i| (starts[i], i));
        order.windows(2).all(|pair| {
            let (a, b) = (pair[0], pair[1]);
            starts[b]
                >= starts[a]
                    .saturating_add(self.tasks[a].duration)
                    .saturating_add(self.min_gap)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_single_window() {
        let d = StartDomain::from_windows(&[TimeWindow::new(540, 720)], 60, 1440);
        assert_eq!(d.ranges(), &[(540, 660)]);
        assert_eq!(d.size(), 121);
        assert_eq!(d.min(), Some(540));
        assert_eq!(d.max(), Some(660));
    }

    #[test]
    fn test_domain_skips_short_windows() {
        let windows = [TimeWindow::new(540, 600), TimeWindow::new(840, 960)];
        let d = StartDomain::from_windows(&windows, 90, 1440);
        assert_eq!(d.ranges(), &[(840, 870)]);
        assert!(!d.contains(540));
        assert_eq!(d.earliest_at_or_after(0), Some(840));
    }

    #[test]
    fn test_domain_exact_fit() {
        let d = StartDomain::from_windows(&[TimeWindow::new(100, 160)], 60, 1440);
        assert_eq!(d.ranges(), &[(100, 100)]);
        assert_eq!(d.size(), 1);
    }

    #[test]
    fn test_domain_empty() {
        let d = StartDomain::from_windows(&[TimeWindow::new(540, 600)], 61, 1440);
        assert!(d.is_empty());
        assert_eq!(d.earliest_at_or_after(0), None);
        assert_eq!(d.min(), None);
    }

    #[test]
    fn test_domain_clipped_by_horizon() {
        let d = StartDomain::from_windows(&[TimeWindow::new(1380, 1500)], 30, 1440);
        assert_eq!(d.ranges(), &[(1380, 1410)]);
    }

    #[test]
    fn test_domain_touching_windows_do_not_join_tasks() {
        // 60-minute windows back to back: a 90-minute task fits in neither.
        let windows = [TimeWindow::new(540, 600), TimeWindow::new(600, 660)];
        assert!(StartDomain::from_windows(&windows, 90, 1440).is_empty());

        // A 30-minute task: starts 540..=570 and 600..=630 (not 571..=599).
        let d = StartDomain::from_windows(&windows, 30, 1440);
        assert_eq!(d.ranges(), &[(540, 570), (600, 630)]);
        assert!(!d.contains(585));
    }

    #[test]
    fn test_earliest_at_or_after() {
        let windows = [TimeWindow::new(540, 600), TimeWindow::new(840, 960)];
        let d = StartDomain::from_windows(&windows, 30, 1440);
        assert_eq!(d.earliest_at_or_after(500), Some(540));
        assert_eq!(d.earliest_at_or_after(560), Some(560));
        assert_eq!(d.earliest_at_or_after(571), Some(840));
        assert_eq!(d.earliest_at_or_after(931), None);
    }

    fn two_task_model(min_gap: i64) -> CpModel {
        let windows = [TimeWindow::new(0, 200)];
        CpModel {
            horizon: 200,
            min_gap,
            tasks: vec![
                TaskVar {
                    name: "A".into(),
                    priority: "High".into(),
                    duration: 50,
                    weight: 3,
                    domain: StartDomain::from_windows(&windows, 50, 200),
                },
                TaskVar {
                    name: "B".into(),
                    priority: "Low".into(),
                    duration: 50,
                    weight: 1,
                    domain: StartDomain::from_windows(&windows, 50, 200),
                },
            ],
        }
    }

    #[test]
    fn test_is_feasible() {
        let m = two_task_model(10);
        assert!(m.is_feasible(&[0, 60]));
        assert!(m.is_feasible(&[60, 0]));
        assert!(!m.is_feasible(&[0, 55])); // gap too small
        assert!(!m.is_feasible(&[0, 25])); // overlap
        assert!(!m.is_feasible(&[0, 151])); // B ends past the window
        assert!(!m.is_feasible(&[0]));
    }

    #[test]
    fn test_objective() {
        let m = two_task_model(0);
        // 3 * (200 - 0) + 1 * (200 - 50)
        assert_eq!(m.objective(&[0, 50]), 750);
        assert_eq!(m.unplaceable(), Vec::<String>::new());
    }
}
