//! Planning domain models.
//!
//! Provides the data types exchanged with the engine: the problem side
//! (tasks, priority weights, availability, break policy) and the solution
//! side (timetable entries and the tagged solve result).
//!
//! # Time Representation
//!
//! Every time value is a whole number of minutes from the start of the
//! horizon. For a single-day plan the horizon is 1440 and minute 540 is
//! 09:00; see [`crate::clock`] for conversions.

mod calendar;
mod constraint;
mod schedule;
mod task;

pub use calendar::{Availability, TimeWindow};
pub use constraint::{BreakMode, BreakPolicy};
pub use schedule::{
    EntryKind, Infeasibility, InfeasibleReason, ScheduleEntry, SolveResult, SolveStatus,
    Timetable, BREAK_LABEL,
};
pub use task::{PriorityWeights, Task};
