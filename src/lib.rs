//! Priority-weighted day planning.
//!
//! Places a set of tasks into a day's availability windows so that
//! higher-priority tasks start as early as possible, with optional breaks
//! between consecutive tasks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `PriorityWeights`, `TimeWindow`,
//!   `Availability`, `BreakPolicy`, `Timetable`, `SolveResult`
//! - **`clock`**: `HH:MM` parsing and formatting, window normalization
//! - **`validation`**: Input integrity checks (blank names, durations,
//!   duplicate names, unknown priorities, inverted windows)
//! - **`cp`**: Start-time model and exact branch-and-bound search
//! - **`scheduler`**: `Planner`, the end-to-end entry point
//! - **`config`**: TOML configuration
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_timetable::{BreakPolicy, Planner, PriorityWeights, Task};
//!
//! let tasks = vec![
//!     Task::new("Emails", 30, "High"),
//!     Task::new("Study", 120, "Low"),
//!     Task::new("Workout", 60, "Medium"),
//! ];
//! let planner = Planner::new(PriorityWeights::labeled())
//!     .with_break_policy(BreakPolicy::hard(10));
//!
//! let result = planner.solve_with_clock(&tasks, &[("09:00", "12:00")]).unwrap();
//! assert!(!result.is_scheduled());
//!
//! let result = planner.solve_with_clock(&tasks, &[("09:00", "13:00")]).unwrap();
//! let first = &result.timetable().unwrap().entries[0];
//! assert_eq!(first.to_string(), "09:00 - 09:30: Emails (High)");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baptiste et al. (2001), "Constraint-Based Scheduling"

pub mod clock;
pub mod config;
pub mod cp;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{ConfigError, PlanError, PlanResult};
pub use models::{
    BreakMode, BreakPolicy, PriorityWeights, SolveResult, SolveStatus, Task, TimeWindow, Timetable,
};
pub use scheduler::Planner;
