//! CP-based timetable formulation.
//!
//! Builds a [`CpModel`] from tasks, availability, and a break policy, and
//! solves it with a [`CpSolver`].
//!
//! # Model
//! - One start variable per task, its domain restricted by interval
//!   containment in a single availability window ([`StartDomain`]).
//! - Pairwise no-overlap on the single timeline.
//! - Hard breaks: a minimum gap between consecutive tasks.
//! - Objective: maximize `sum(weight * (horizon - start))`.
//!
//! # Reference
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod model;
mod solver;

pub use model::{CpModel, StartDomain, TaskVar};
pub use solver::{BranchAndBoundSolver, CpSolution, CpSolver, CpStatus, SolverConfig};

use tracing::debug;

use crate::models::{Availability, BreakPolicy, PriorityWeights, Task};

/// Builds a CP model from planning domain objects.
///
/// Assumes the tasks passed validation against `weights`; a label missing
/// from the table gets weight 0.
///
/// # Example
/// ```
/// use u_timetable::cp::{BranchAndBoundSolver, CpSolver, SolverConfig, TimetableCpBuilder};
/// use u_timetable::models::{Availability, BreakPolicy, PriorityWeights, Task, TimeWindow};
///
/// let tasks = vec![Task::new("Emails", 30, "High"), Task::new("Study", 120, "Low")];
/// let availability = Availability::new(vec![TimeWindow::new(540, 780)], 1440);
/// let weights = PriorityWeights::labeled();
///
/// let model = TimetableCpBuilder::new(&tasks, &availability, &weights)
///     .with_break_policy(BreakPolicy::hard(10))
///     .build(1440);
/// let solution = BranchAndBoundSolver::new().solve(&model, &SolverConfig::default());
/// assert_eq!(solution.starts, vec![540, 580]);
/// ```
pub struct TimetableCpBuilder<'a> {
    tasks: &'a [Task],
    availability: &'a Availability,
    weights: &'a PriorityWeights,
    break_policy: BreakPolicy,
}

impl<'a> TimetableCpBuilder<'a> {
    /// Creates a new CP builder.
    pub fn new(
        tasks: &'a [Task],
        availability: &'a Availability,
        weights: &'a PriorityWeights,
    ) -> Self {
        Self {
            tasks,
            availability,
            weights,
            break_policy: BreakPolicy::none(),
        }
    }

    /// Sets the break policy.
    pub fn with_break_policy(mut self, break_policy: BreakPolicy) -> Self {
        self.break_policy = break_policy;
        self
    }

    /// Builds a CP model over `[0, horizon]`.
    pub fn build(&self, horizon: i64) -> CpModel {
        let windows = self.availability.windows();
        let tasks: Vec<TaskVar> = self
            .tasks
            .iter()
            .map(|task| TaskVar {
                name: task.name.clone(),
                priority: task.priority.clone(),
                duration: task.duration,
                weight: self.weights.weight(&task.priority).unwrap_or(0),
                domain: StartDomain::from_windows(windows, task.duration, horizon),
            })
            .collect();

        for var in &tasks {
            debug!(
                target: "u_timetable::cp",
                task = %var.name,
                weight = var.weight,
                earliest = ?var.domain.min(),
                latest = ?var.domain.max(),
                domain_size = var.domain.size(),
                "start variable"
            );
        }

        CpModel {
            horizon,
            min_gap: self.break_policy.min_gap(),
            tasks,
        }
    }
}
