//! Day planning on top of the CP formulation.
//!
//! [`Planner`] validates input, builds and solves the model, and decodes
//! the solution; [`build_entries`] is the decoding step on its own.
//!
//! # Objective
//!
//! Maximize `sum(weight * (horizon - start))`: heavier tasks are pulled
//! toward the start of the day. The result is either a [`Timetable`] or an
//! [`Infeasibility`] report; input errors are the only `Err` case.
//!
//! [`Timetable`]: crate::models::Timetable
//! [`Infeasibility`]: crate::models::Infeasibility
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod planner;
mod timetable;

pub use planner::{solve, Planner};
pub use timetable::build_entries;
