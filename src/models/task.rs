//! Task model and priority weighting.
//!
//! A task is a named block of work with a fixed duration and a priority
//! label. The label is resolved to a numeric objective weight through a
//! caller-supplied [`PriorityWeights`] table, so both "High/Medium/Low"
//! labels and ranked integers ("1" = most important) are supported.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A task to be placed on the day's timeline.
///
/// # Time Representation
/// Durations are whole minutes. Start times produced by the engine are
/// minutes since the start of the horizon (midnight for a single day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, non-empty task name.
    pub name: String,
    /// Duration in minutes (> 0).
    pub duration: i64,
    /// Priority label, looked up in [`PriorityWeights`].
    pub priority: String,
}

impl Task {
    /// Creates a new task.
    pub fn new(name: impl Into<String>, duration: i64, priority: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            priority: priority.into(),
        }
    }

    /// Sets the priority label.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }
}

/// Mapping from priority label to objective weight.
///
/// Higher weight = stronger pull toward an early start. Weights must be
/// non-negative; [`PlannerConfig::validate`](crate::config::PlannerConfig::validate)
/// enforces this for configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityWeights {
    weights: BTreeMap<String, i64>,
}

impl PriorityWeights {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// `High = 3`, `Medium = 2`, `Low = 1`.
    pub fn labeled() -> Self {
        Self::new()
            .with_weight("High", 3)
            .with_weight("Medium", 2)
            .with_weight("Low", 1)
    }

    /// Ranked priorities `"1"..="levels"` where `"1"` is the most important.
    ///
    /// Rank `k` receives weight `levels + 1 - k`, so with three levels
    /// `"1" = 3`, `"2" = 2`, `"3" = 1`.
    pub fn ranked(levels: u32) -> Self {
        (1..=levels).fold(Self::new(), |table, rank| {
            table.with_weight(rank.to_string(), i64::from(levels + 1 - rank))
        })
    }

    /// Adds or replaces a label's weight.
    pub fn with_weight(mut self, label: impl Into<String>, weight: i64) -> Self {
        self.weights.insert(label.into(), weight);
        self
    }

    /// Weight for a label, if configured.
    pub fn weight(&self, label: &str) -> Option<i64> {
        self.weights.get(label).copied()
    }

    /// Whether a label is configured.
    pub fn contains(&self, label: &str) -> bool {
        self.weights.contains_key(label)
    }

    /// Iterates over `(label, weight)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of configured labels.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no labels are configured.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::labeled()
    }
}
