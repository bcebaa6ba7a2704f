//! TOML-based planner configuration.
//!
//! Everything a solve call needs besides the tasks and windows themselves:
//! - Horizon length and search budget
//! - Break policy (duration and hard/soft mode)
//! - Priority label → weight table
//! - Whether overlapping windows are merged
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! horizon = 1440
//! time_budget_ms = 5000
//! merge_windows = false
//!
//! [break_policy]
//! duration = 10
//! mode = "soft"
//!
//! [priority_weights]
//! High = 3
//! Medium = 2
//! Low = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::clock::MINUTES_PER_DAY;
use crate::cp::SolverConfig;
use crate::error::ConfigError;
use crate::models::{BreakPolicy, PriorityWeights};

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Upper bound of the time axis (minutes).
    pub horizon: i64,
    /// Wall-clock search budget (milliseconds).
    pub time_budget_ms: u64,
    /// Optional cap on search nodes.
    pub node_limit: Option<u64>,
    /// Spacing between consecutive tasks.
    pub break_policy: BreakPolicy,
    /// Priority label → objective weight.
    pub priority_weights: PriorityWeights,
    /// Merge overlapping availability windows before building the model.
    pub merge_windows: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon: MINUTES_PER_DAY,
            time_budget_ms: 5_000,
            node_limit: None,
            break_policy: BreakPolicy::none(),
            priority_weights: PriorityWeights::labeled(),
            merge_windows: false,
        }
    }
}

impl PlannerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon <= 0 {
            return Err(ConfigError::invalid("horizon", "must be positive"));
        }
        if self.break_policy.duration < 0 {
            return Err(ConfigError::invalid(
                "break_policy.duration",
                "must not be negative",
            ));
        }
        if self.break_policy.duration > self.horizon {
            return Err(ConfigError::invalid(
                "break_policy.duration",
                format!("must not exceed the horizon ({})", self.horizon),
            ));
        }
        if self.priority_weights.is_empty() {
            return Err(ConfigError::invalid(
                "priority_weights",
                "at least one priority is required",
            ));
        }
        if let Some((label, weight)) = self.priority_weights.iter().find(|(_, w)| *w < 0) {
            return Err(ConfigError::invalid(
                format!("priority_weights.{label}"),
                format!("weight {weight} must not be negative"),
            ));
        }
        Ok(())
    }

    /// Checks value ranges, then that the objective of `task_count` tasks
    /// fits in an `i64` (`max weight * horizon * task_count`).
    pub fn validate_for_tasks(&self, task_count: usize) -> Result<(), ConfigError> {
        self.validate()?;
        let max_weight = self
            .priority_weights
            .iter()
            .map(|(_, w)| w)
            .max()
            .unwrap_or(0);
        let count = i64::try_from(task_count).unwrap_or(i64::MAX);
        if max_weight
            .checked_mul(self.horizon)
            .and_then(|v| v.checked_mul(count))
            .is_none()
        {
            return Err(ConfigError::invalid(
                "priority_weights",
                format!(
                    "weight {max_weight} x horizon {} x {task_count} tasks overflows",
                    self.horizon
                ),
            ));
        }
        Ok(())
    }

    /// Search limits derived from this configuration.
    pub fn solver_config(&self) -> SolverConfig {
        let config =
            SolverConfig::default().with_time_limit(Duration::from_millis(self.time_budget_ms));
        match self.node_limit {
            Some(nodes) => config.with_node_limit(nodes),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakMode;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PlannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.horizon, 1440);
        assert_eq!(config.time_budget_ms, 5000);
        assert_eq!(config.priority_weights.weight("High"), Some(3));
    }

    #[test]
    fn test_full_document() {
        let config = PlannerConfig::from_toml_str(
            r#"
            horizon = 720
            time_budget_ms = 250
            node_limit = 10000
            merge_windows = true

            [break_policy]
            duration = 15
            mode = "soft"

            [priority_weights]
            "1" = 3
            "2" = 2
            "3" = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.horizon, 720);
        assert!(config.merge_windows);
        assert_eq!(config.break_policy.duration, 15);
        assert_eq!(config.break_policy.mode, BreakMode::Soft);
        assert_eq!(config.priority_weights, PriorityWeights::ranked(3));

        let solver = config.solver_config();
        assert_eq!(solver.time_limit, Duration::from_millis(250));
        assert_eq!(solver.node_limit, Some(10_000));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PlannerConfig::from_toml_str("horizon = 0"),
            Err(ConfigError::Invalid { field, .. }) if field == "horizon"
        ));
        assert!(matches!(
            PlannerConfig::from_toml_str("[break_policy]\nduration = -5"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            PlannerConfig::from_toml_str("[priority_weights]\nHigh = -1"),
            Err(ConfigError::Invalid { field, .. }) if field == "priority_weights.High"
        ));
    }

    #[test]
    fn test_rejects_break_longer_than_horizon() {
        assert!(matches!(
            PlannerConfig::from_toml_str("horizon = 600\n[break_policy]\nduration = 601"),
            Err(ConfigError::Invalid { field, .. }) if field == "break_policy.duration"
        ));
        let exact = PlannerConfig::from_toml_str("horizon = 600\n[break_policy]\nduration = 600");
        assert!(exact.is_ok());
    }

    #[test]
    fn test_objective_overflow_rejected() {
        let config = PlannerConfig {
            priority_weights: PriorityWeights::new().with_weight("High", i64::MAX / 2),
            ..PlannerConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.validate_for_tasks(1),
            Err(ConfigError::Invalid { field, .. }) if field == "priority_weights"
        ));

        // 3 * 1440 * n stays far from the limit for any realistic list.
        let defaults = PlannerConfig::default();
        assert!(defaults.validate_for_tasks(10_000).is_ok());
        assert!(defaults.validate_for_tasks(0).is_ok());

        let wide = PlannerConfig {
            horizon: i64::MAX / 2,
            ..PlannerConfig::default()
        };
        assert!(wide.validate_for_tasks(1).is_err());
    }

    #[test]
    fn test_rejects_bad_mode() {
        assert!(matches!(
            PlannerConfig::from_toml_str("[break_policy]\nmode = \"sometimes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlannerConfig::load("/nonexistent/u-timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
