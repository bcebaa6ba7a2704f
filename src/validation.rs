//! Input validation for planning problems.
//!
//! The presentation layer is expected to filter out blank names and
//! non-positive durations, but the engine re-checks its inputs before
//! building a model. Detects:
//! - An empty task list
//! - Blank task names
//! - Non-positive durations
//! - Duplicate task names
//! - Priority labels missing from the weight table
//! - Inverted availability windows

use std::collections::HashSet;

use crate::error::{PlanError, PlanResult};
use crate::models::{PriorityWeights, Task, TimeWindow};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Nothing to schedule.
    NoTasks,
    /// Task name is empty or whitespace.
    EmptyName,
    /// Duration is zero or negative.
    NonPositiveDuration,
    /// Two tasks share the same name.
    DuplicateName,
    /// Priority label has no configured weight.
    UnknownPriority,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the tasks of a planning problem.
///
/// Checks:
/// 1. At least one task
/// 2. Every name is non-blank
/// 3. Every duration is positive
/// 4. No duplicate names
/// 5. Every priority has a weight in `weights`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task], weights: &PriorityWeights) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTasks,
            "No tasks to schedule",
        ));
    }

    let mut names = HashSet::new();
    for (i, task) in tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Task #{} has an empty name", i + 1),
            ));
        } else if !names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate task name: {}", task.name),
            ));
        }

        if task.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Task '{}' has non-positive duration {}",
                    task.name, task.duration
                ),
            ));
        }

        if !weights.contains(&task.priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPriority,
                format!(
                    "Task '{}' has unknown priority '{}'",
                    task.name, task.priority
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that every window satisfies `start < end`.
///
/// Fails fast on the first inverted window.
pub fn validate_windows(windows: &[TimeWindow]) -> PlanResult<()> {
    match windows.iter().find(|w| w.start >= w.end) {
        Some(w) => Err(PlanError::InvalidWindow {
            start: w.start,
            end: w.end,
        }),
        None => Ok(()),
    }
}
