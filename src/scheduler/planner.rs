//! Day planner: the single entry point from tasks and windows to a result.
//!
//! # Pipeline
//! 1. Validate tasks and windows (fail fast, no model built).
//! 2. Normalize availability against the horizon.
//! 3. Build the CP model; tasks that fit no window end the call as
//!    infeasible without searching.
//! 4. Search within the time budget.
//! 5. Decode into an ordered timetable with breaks.
//!
//! Each call owns its model and discards it on return; nothing is shared
//! between calls.

use std::time::Duration;

use tracing::{info, warn};

use super::timetable::build_entries;
use crate::clock::normalize_windows;
use crate::config::PlannerConfig;
use crate::cp::{BranchAndBoundSolver, CpSolver, CpStatus, TimetableCpBuilder};
use crate::error::{PlanError, PlanResult};
use crate::models::{
    Availability, BreakPolicy, Infeasibility, InfeasibleReason, PriorityWeights, SolveResult,
    SolveStatus, Task, TimeWindow, Timetable,
};
use crate::validation::{validate_tasks, validate_windows};

/// Priority-weighted day planner.
///
/// # Example
/// ```
/// use u_timetable::models::{BreakPolicy, PriorityWeights, Task};
/// use u_timetable::scheduler::Planner;
///
/// let planner = Planner::new(PriorityWeights::labeled())
///     .with_break_policy(BreakPolicy::hard(10));
/// let tasks = vec![
///     Task::new("Emails", 30, "High"),
///     Task::new("Workout", 60, "Medium"),
/// ];
///
/// let result = planner.solve_with_clock(&tasks, &[("09:00", "12:00")]).unwrap();
/// let timetable = result.timetable().unwrap();
/// assert_eq!(
///     timetable.lines(),
///     vec![
///         "09:00 - 09:30: Emails (High)",
///         "09:30 - 09:40: Break",
///         "09:40 - 10:40: Workout (Medium)",
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Planner<S = BranchAndBoundSolver> {
    config: PlannerConfig,
    solver: S,
}

impl Planner {
    /// Creates a planner with default settings and the given weights.
    pub fn new(weights: PriorityWeights) -> Self {
        Self {
            config: PlannerConfig {
                priority_weights: weights,
                ..PlannerConfig::default()
            },
            solver: BranchAndBoundSolver::new(),
        }
    }

    /// Creates a planner from a validated configuration.
    pub fn from_config(config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            solver: BranchAndBoundSolver::new(),
        })
    }
}

impl<S: CpSolver> Planner<S> {
    /// Replaces the search procedure.
    pub fn with_solver<T: CpSolver>(self, solver: T) -> Planner<T> {
        Planner {
            config: self.config,
            solver,
        }
    }

    /// Sets the break policy.
    pub fn with_break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.config.break_policy = break_policy;
        self
    }

    /// Sets the horizon (minutes).
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.config.horizon = horizon;
        self
    }

    /// Sets the wall-clock search budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Caps the number of search nodes.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.config.node_limit = Some(nodes);
        self
    }

    /// Merges overlapping windows before building the model.
    pub fn with_merged_windows(mut self, merge: bool) -> Self {
        self.config.merge_windows = merge;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Places `tasks` into `windows`.
    ///
    /// # Errors
    /// - [`PlanError::InvalidTask`] for blank names, non-positive durations,
    ///   duplicate names, unknown priorities, or no tasks at all.
    /// - [`PlanError::InvalidWindow`] for a window with `start >= end`.
    /// - [`PlanError::Config`] if the planner settings are out of range, or
    ///   the objective of `tasks` could overflow under them.
    ///
    /// Infeasibility is not an error: it is returned as
    /// [`SolveResult::Infeasible`].
    pub fn solve(&self, tasks: &[Task], windows: &[TimeWindow]) -> PlanResult<SolveResult> {
        self.config.validate_for_tasks(tasks.len())?;
        validate_tasks(tasks, &self.config.priority_weights).map_err(PlanError::InvalidTask)?;
        validate_windows(windows)?;

        let horizon = self.config.horizon;
        let mut availability = Availability::new(windows.iter().copied(), horizon);
        if self.config.merge_windows {
            availability = availability.merged();
        }

        let model = TimetableCpBuilder::new(tasks, &availability, &self.config.priority_weights)
            .with_break_policy(self.config.break_policy)
            .build(horizon);
        let task_names = || tasks.iter().map(|t| t.name.clone()).collect::<Vec<_>>();

        let unplaceable = model.unplaceable();
        if !unplaceable.is_empty() {
            warn!(
                target: "u_timetable::planner",
                tasks = ?unplaceable,
                longest_window = availability.longest(),
                "tasks fit in no availability window"
            );
            return Ok(SolveResult::Infeasible(Infeasibility {
                tasks: task_names(),
                reason: InfeasibleReason::NoFittingWindow { tasks: unplaceable },
            }));
        }

        let solution = self.solver.solve(&model, &self.config.solver_config());
        info!(
            target: "u_timetable::planner",
            solver = self.solver.name(),
            status = ?solution.status,
            nodes = solution.nodes,
            elapsed_ms = u64::try_from(solution.elapsed.as_millis()).unwrap_or(u64::MAX),
            objective = solution.objective,
            "search finished"
        );

        let status = match solution.status {
            CpStatus::Optimal => SolveStatus::Optimal,
            CpStatus::Feasible => SolveStatus::FeasibleTimeout,
            CpStatus::Infeasible | CpStatus::Unknown => {
                let reason = if solution.status == CpStatus::Unknown {
                    InfeasibleReason::BudgetExhausted
                } else {
                    InfeasibleReason::NoFeasibleAssignment
                };
                warn!(target: "u_timetable::planner", ?reason, "no schedule produced");
                return Ok(SolveResult::Infeasible(Infeasibility {
                    tasks: task_names(),
                    reason,
                }));
            }
        };

        Ok(SolveResult::Scheduled(Timetable {
            entries: build_entries(&model, &solution.starts, &self.config.break_policy),
            status,
            objective: solution.objective,
        }))
    }

    /// Like [`Planner::solve`], with windows given as `HH:MM` pairs.
    ///
    /// # Errors
    /// Additionally [`PlanError::InvalidTimeFormat`] for malformed clock
    /// strings.
    pub fn solve_with_clock<A, B>(
        &self,
        tasks: &[Task],
        raw_windows: &[(A, B)],
    ) -> PlanResult<SolveResult>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let windows = normalize_windows(raw_windows)?;
        self.solve(tasks, &windows)
    }
}

/// One-shot solve with explicit parameters.
///
/// Equivalent to a [`Planner`] configured with `weights`, `break_policy`,
/// `horizon`, and `time_budget`.
pub fn solve(
    tasks: &[Task],
    windows: &[TimeWindow],
    break_policy: BreakPolicy,
    horizon: i64,
    time_budget: Duration,
    weights: &PriorityWeights,
) -> PlanResult<SolveResult> {
    Planner::new(weights.clone())
        .with_break_policy(break_policy)
        .with_horizon(horizon)
        .with_time_budget(time_budget)
        .solve(tasks, windows)
}
