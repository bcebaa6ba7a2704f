//! Solution decoding and break insertion.
//!
//! # Algorithm
//! 1. Pair each task variable with its solved start; sort by start (input
//!    order on ties).
//! 2. Walk consecutive pairs. Hard mode inserts a break of exactly the
//!    policy duration after each task but the last (the solver guaranteed
//!    the room). Soft mode inserts one only where the actual gap is at
//!    least the policy duration; smaller gaps are left out of the output.

use crate::cp::CpModel;
use crate::models::{BreakMode, BreakPolicy, ScheduleEntry};

/// Turns solved starts into ordered timetable entries.
///
/// `starts` is indexed like `model.tasks`.
pub fn build_entries(model: &CpModel, starts: &[i64], policy: &BreakPolicy) -> Vec<ScheduleEntry> {
    let mut placed: Vec<(usize, i64)> = starts.iter().copied().enumerate().collect();
    placed.sort_by_key(|&(i, start)| (start, i));

    let mut entries = Vec::with_capacity(placed.len() * 2);
    for (pos, &(i, start)) in placed.iter().enumerate() {
        let task = &model.tasks[i];
        let end = start.saturating_add(task.duration);
        entries.push(ScheduleEntry::task(&task.name, &task.priority, start, end));

        let Some(&(_, next_start)) = placed.get(pos + 1) else {
            continue;
        };
        let insert = match policy.mode {
            BreakMode::Hard => policy.duration > 0,
            BreakMode::Soft => policy.fits_break(next_start - end),
        };
        if insert {
            entries.push(ScheduleEntry::rest(end, end.saturating_add(policy.duration)));
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{StartDomain, TaskVar};
    use crate::models::TimeWindow;

    fn model(durations: &[(&str, i64)], min_gap: i64) -> CpModel {
        let windows = [TimeWindow::new(0, 1440)];
        CpModel {
            horizon: 1440,
            min_gap,
            tasks: durations
                .iter()
                .map(|&(name, duration)| TaskVar {
                    name: name.into(),
                    priority: "High".into(),
                    duration,
                    weight: 1,
                    domain: StartDomain::from_windows(&windows, duration, 1440),
                })
                .collect(),
        }
    }

    fn labels(entries: &[ScheduleEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_start() {
        let m = model(&[("A", 30), ("B", 30), ("C", 30)], 0);
        let entries = build_entries(&m, &[100, 0, 50], &BreakPolicy::none());
        assert_eq!(labels(&entries), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_hard_breaks_between_every_pair() {
        let m = model(&[("A", 30), ("B", 60), ("C", 20)], 10);
        let entries = build_entries(&m, &[540, 580, 700], &BreakPolicy::hard(10));
        assert_eq!(labels(&entries), vec!["A", "Break", "B", "Break", "C"]);

        let breaks: Vec<(i64, i64)> = entries
            .iter()
            .filter(|e| e.is_break())
            .map(|e| (e.start, e.end))
            .collect();
        // Exactly the policy length, even where the gap is wider (640..700).
        assert_eq!(breaks, vec![(570, 580), (640, 650)]);
    }

    #[test]
    fn test_soft_breaks_only_where_gap_allows() {
        let m = model(&[("A", 30), ("B", 30), ("C", 30)], 0);
        // A 540-570, B 575-605 (gap 5), C 620-650 (gap 15)
        let entries = build_entries(&m, &[540, 575, 620], &BreakPolicy::soft(10));
        assert_eq!(labels(&entries), vec!["A", "B", "Break", "C"]);
        let brk = &entries[2];
        assert_eq!((brk.start, brk.end), (605, 615));
    }

    #[test]
    fn test_soft_break_exact_gap() {
        let m = model(&[("A", 30), ("B", 30)], 0);
        let entries = build_entries(&m, &[0, 40], &BreakPolicy::soft(10));
        assert_eq!(labels(&entries), vec!["A", "Break", "B"]);
    }

    #[test]
    fn test_zero_break_inserts_nothing() {
        let m = model(&[("A", 30), ("B", 30)], 0);
        for policy in [BreakPolicy::hard(0), BreakPolicy::soft(0)] {
            let entries = build_entries(&m, &[0, 30], &policy);
            assert_eq!(labels(&entries), vec!["A", "B"]);
        }
    }

    #[test]
    fn test_no_trailing_break() {
        let m = model(&[("A", 30)], 10);
        let entries = build_entries(&m, &[0], &BreakPolicy::hard(10));
        assert_eq!(entries.len(), 1);
    }
}
