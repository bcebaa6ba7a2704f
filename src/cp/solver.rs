//! Bounded branch-and-bound search.
//!
//! # Algorithm
//!
//! The search branches on *which task comes next* on the timeline and
//! places it at the earliest start its domain allows after the previous
//! task's end (plus the minimum gap). For a fixed order this left-justified
//! placement minimizes every start simultaneously, so with non-negative
//! weights exploring orders is exact.
//!
//! Pruning:
//! - **Feasibility**: a node dies as soon as any unplaced task has no
//!   start left at or after the current ready time.
//! - **Bound**: cost so far plus each unplaced task's earliest start times
//!   its weight is a lower bound on the final cost (cost = `sum(w * start)`,
//!   the objective's complement).
//! - **Dominance**: two partial orders over the same task set are compared
//!   on `(ready time, cost)`; a state no better on both is dropped.
//!
//! Branch order is weight descending, then earliest start, then input
//! order. Only strictly better solutions replace the incumbent, which makes
//! the result deterministic for a given model.
//!
//! Ready times and costs saturate instead of wrapping. A saturated ready
//! time lies past every domain, so the branch dies as infeasible.
//!
//! # Reference
//! Baptiste et al. (2001), "Constraint-Based Scheduling", Ch. 2

use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::CpModel;

/// How often (in nodes) the wall clock is consulted.
const CLOCK_CHECK_INTERVAL: u64 = 64;

/// Upper bound on dominance-table entries across all task sets.
const MAX_DOMINANCE_ENTRIES: usize = 1 << 20;

/// Search limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock cap on the search.
    pub time_limit: Duration,
    /// Optional cap on explored nodes.
    pub node_limit: Option<u64>,
}

impl SolverConfig {
    /// Sets the wall-clock cap.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the node cap.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            node_limit: None,
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpStatus {
    /// Search completed with a solution; it is optimal.
    Optimal,
    /// A limit was hit after at least one solution was found.
    Feasible,
    /// Search completed without a solution.
    Infeasible,
    /// A limit was hit before any solution was found.
    Unknown,
}

/// Search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpSolution {
    /// How the search ended.
    pub status: CpStatus,
    /// Start per task in model order; empty when no solution was found.
    pub starts: Vec<i64>,
    /// Objective of `starts` (0 when no solution was found).
    pub objective: i64,
    /// Nodes explored.
    pub nodes: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl CpSolution {
    /// Whether a feasible assignment is available.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, CpStatus::Optimal | CpStatus::Feasible)
    }
}

/// A solver for [`CpModel`]s.
pub trait CpSolver {
    /// Solver name for logging.
    fn name(&self) -> &'static str;

    /// Searches for the best assignment within the configured limits.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

/// Exact depth-first branch-and-bound over task orders.
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    dominance: bool,
}

impl BranchAndBoundSolver {
    /// Creates a solver with dominance pruning enabled.
    pub fn new() -> Self {
        Self { dominance: true }
    }

    /// Disables dominance pruning (bound and feasibility pruning remain).
    pub fn without_dominance(mut self) -> Self {
        self.dominance = false;
        self
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CpSolver for BranchAndBoundSolver {
    fn name(&self) -> &'static str {
        "branch-and-bound"
    }

    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        let started = Instant::now();
        let n = model.task_count();
        let mut search = Search {
            model,
            deadline: started + config.time_limit,
            node_limit: config.node_limit,
            // Task sets are keyed by bitmask, so the table only covers up to 64 tasks.
            dominance: self.dominance && n <= 64,
            nodes: 0,
            stopped: false,
            placed: vec![false; n],
            starts: vec![0; n],
            best: None,
            seen: HashMap::new(),
            seen_entries: 0,
        };
        search.dfs(0, 0, 0, 0);

        let status = match (search.best.is_some(), search.stopped) {
            (true, false) => CpStatus::Optimal,
            (true, true) => CpStatus::Feasible,
            (false, false) => CpStatus::Infeasible,
            (false, true) => CpStatus::Unknown,
        };
        let starts = search.best.map(|(_, s)| s).unwrap_or_default();
        let objective = if starts.is_empty() {
            0
        } else {
            model.objective(&starts)
        };

        CpSolution {
            status,
            starts,
            objective,
            nodes: search.nodes,
            elapsed: started.elapsed(),
        }
    }
}

struct Search<'m> {
    model: &'m CpModel,
    deadline: Instant,
    node_limit: Option<u64>,
    dominance: bool,
    nodes: u64,
    stopped: bool,
    placed: Vec<bool>,
    starts: Vec<i64>,
    /// `(cost, starts)` of the incumbent.
    best: Option<(i64, Vec<i64>)>,
    /// Task-set mask → non-dominated `(ready, cost)` pairs already explored.
    seen: HashMap<u64, Vec<(i64, i64)>>,
    seen_entries: usize,
}

impl Search<'_> {
    fn limit_reached(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let over_nodes = self.node_limit.is_some_and(|limit| self.nodes >= limit);
        let over_time =
            self.nodes % CLOCK_CHECK_INTERVAL == 0 && Instant::now() >= self.deadline;
        if over_nodes || over_time {
            self.stopped = true;
        }
        self.stopped
    }

    fn dfs(&mut self, depth: usize, mask: u64, ready: i64, cost: i64) {
        if self.limit_reached() {
            return;
        }
        self.nodes += 1;

        let model = self.model;
        let tasks = &model.tasks;
        if depth == tasks.len() {
            if self.best.as_ref().map_or(true, |(best, _)| cost < *best) {
                debug!(
                    target: "u_timetable::cp",
                    nodes = self.nodes,
                    objective = model.objective(&self.starts),
                    "improved incumbent"
                );
                self.best = Some((cost, self.starts.clone()));
            }
            return;
        }

        let mut candidates = Vec::with_capacity(tasks.len() - depth);
        let mut bound = cost;
        for (j, task) in tasks.iter().enumerate() {
            if self.placed[j] {
                continue;
            }
            match task.domain.earliest_at_or_after(ready) {
                Some(start) => {
                    bound = bound.saturating_add(task.weight.saturating_mul(start));
                    candidates.push((j, start));
                }
                None => return,
            }
        }

        if let Some((best, _)) = &self.best {
            if bound >= *best {
                return;
            }
        }

        if self.dominance && self.is_dominated(mask, ready, cost) {
            return;
        }

        candidates.sort_by_key(|&(j, start)| (Reverse(tasks[j].weight), start, j));

        for (j, start) in candidates {
            let task = &tasks[j];
            let next_ready = start
                .saturating_add(task.duration)
                .saturating_add(model.min_gap);
            let next_cost = cost.saturating_add(task.weight.saturating_mul(start));

            self.placed[j] = true;
            self.starts[j] = start;
            self.dfs(depth + 1, mask | (1u64 << (j % 64)), next_ready, next_cost);
            self.placed[j] = false;

            if self.stopped {
                return;
            }
        }
    }

    /// Records `(ready, cost)` for `mask` unless an explored state dominates it.
    fn is_dominated(&mut self, mask: u64, ready: i64, cost: i64) -> bool {
        let entries = self.seen.entry(mask).or_default();
        if entries.iter().any(|&(r, c)| r <= ready && c <= cost) {
            return true;
        }

        let before = entries.len();
        entries.retain(|&(r, c)| !(r >= ready && c >= cost));
        self.seen_entries -= before - entries.len();

        if self.seen_entries < MAX_DOMINANCE_ENTRIES {
            entries.push((ready, cost));
            self.seen_entries += 1;
        }
        false
    }
}
