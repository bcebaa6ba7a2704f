//! Timetable (solution) model.
//!
//! A solve call ends in exactly one [`SolveResult`]: either an ordered
//! [`Timetable`] of task and break entries, or an [`Infeasibility`] naming
//! the tasks of the failed model. No partial schedule is ever returned.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_clock;

/// Label used for break entries.
pub const BREAK_LABEL: &str = "Break";

/// What a timetable entry represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntryKind {
    /// A scheduled task with its priority label.
    Task { priority: String },
    /// A break between two tasks.
    Break,
}

/// One line of the timetable: `[start, end)` in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Task name, or [`BREAK_LABEL`].
    pub label: String,
    /// Start (minutes, inclusive).
    pub start: i64,
    /// End (minutes, exclusive).
    pub end: i64,
    /// Task or break.
    #[serde(flatten)]
    pub kind: EntryKind,
}

impl ScheduleEntry {
    /// Creates a task entry.
    pub fn task(
        name: impl Into<String>,
        priority: impl Into<String>,
        start: i64,
        end: i64,
    ) -> Self {
        Self {
            label: name.into(),
            start,
            end,
            kind: EntryKind::Task {
                priority: priority.into(),
            },
        }
    }

    /// Creates a break entry.
    pub fn rest(start: i64, end: i64) -> Self {
        Self {
            label: BREAK_LABEL.to_string(),
            start,
            end,
            kind: EntryKind::Break,
        }
    }

    /// Length in minutes.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this is a break entry.
    #[inline]
    pub fn is_break(&self) -> bool {
        matches!(self.kind, EntryKind::Break)
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            format_clock(self.start),
            format_clock(self.end),
            self.label
        )?;
        if let EntryKind::Task { priority } = &self.kind {
            write!(f, " ({priority})")?;
        }
        Ok(())
    }
}

/// How the search ended for a scheduled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Search completed; the objective is proven optimal.
    Optimal,
    /// Budget expired; best feasible assignment found so far.
    FeasibleTimeout,
}

/// An ordered day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Entries sorted by start, tasks interleaved with breaks.
    pub entries: Vec<ScheduleEntry>,
    /// Whether optimality was proven.
    pub status: SolveStatus,
    /// Objective value: `sum(weight * (horizon - start))`.
    pub objective: i64,
}

impl Timetable {
    /// Whether the objective is proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Task entries in start order.
    pub fn tasks(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| !e.is_break())
    }

    /// Break entries in start order.
    pub fn breaks(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|e| e.is_break())
    }

    /// Entry for a task name.
    pub fn entry_for(&self, name: &str) -> Option<&ScheduleEntry> {
        self.tasks().find(|e| e.label == name)
    }

    /// Minutes from the first start to the last end (0 when empty).
    pub fn span(&self) -> i64 {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0,
        }
    }

    /// Rendered lines, one per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

/// Why no timetable could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// These tasks fit in no single availability window.
    NoFittingWindow { tasks: Vec<String> },
    /// Every window fits each task alone, but not all of them together.
    NoFeasibleAssignment,
    /// The time budget ran out before any feasible assignment was found.
    BudgetExhausted,
}

/// Failure outcome of a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infeasibility {
    /// All tasks of the failed model, in input order.
    pub tasks: Vec<String>,
    /// Cause.
    pub reason: InfeasibleReason,
}

impl Infeasibility {
    /// Remediation hint for the user.
    pub const HINT: &'static str = "Reduce durations or extend available time.";
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            InfeasibleReason::NoFittingWindow { tasks } => write!(
                f,
                "Could not generate schedule: no availability window is long enough for {}.",
                tasks.join(", ")
            )?,
            InfeasibleReason::NoFeasibleAssignment => write!(
                f,
                "Could not generate schedule: {} task(s) do not fit together.",
                self.tasks.len()
            )?,
            InfeasibleReason::BudgetExhausted => write!(
                f,
                "Could not generate schedule within the time budget."
            )?,
        }
        write!(f, " {}", Self::HINT)
    }
}

/// Outcome of a solve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SolveResult {
    /// A feasible (possibly optimal) timetable.
    Scheduled(Timetable),
    /// No assignment satisfies the hard constraints.
    Infeasible(Infeasibility),
}

impl SolveResult {
    /// The timetable, if scheduling succeeded.
    pub fn timetable(&self) -> Option<&Timetable> {
        match self {
            Self::Scheduled(t) => Some(t),
            Self::Infeasible(_) => None,
        }
    }

    /// The failure, if scheduling failed.
    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            Self::Scheduled(_) => None,
            Self::Infeasible(i) => Some(i),
        }
    }

    /// Whether a timetable was produced.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled(_))
    }
}
