//! Process step model.
//!
//! A process step is one required manufacturing operation, produced by the
//! upstream process planner. Each step names the machine (or operation) it
//! needs; the matcher treats that machine string as the unit of coverage.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default duration (minutes) used when a planner omits an estimate.
pub const DEFAULT_STEP_MINUTES: u32 = 10;

/// A required manufacturing step.
///
/// Read-only to the matching core. Two steps may share a machine; they still
/// count as separate entries in a company's covered-step list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessStep {
    /// Step name (e.g., "Rough", "穴あけ").
    pub name: String,
    /// Required machine or operation, free text (e.g., "VMC", "タッピングセンタ").
    pub machine: String,
    /// Estimated duration in minutes (positive).
    pub minutes: u32,
    /// Tolerance annotation (e.g., "±0.05").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<String>,
    /// Precision tag (e.g., rough / finish / inspection).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<String>,
}

impl ProcessStep {
    /// Creates a step with the default duration.
    pub fn new(name: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            machine: machine.into(),
            minutes: DEFAULT_STEP_MINUTES,
            tolerance: None,
            precision: None,
        }
    }

    /// Sets the estimated duration (minutes).
    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = minutes;
        self
    }

    /// Sets the tolerance annotation.
    pub fn with_tolerance(mut self, tolerance: impl Into<String>) -> Self {
        self.tolerance = Some(tolerance.into());
        self
    }

    /// Sets the precision tag.
    pub fn with_precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// `name(machine)`, the form used in advisory prompts.
    pub fn describe(&self) -> String {
        format!("{}({})", self.name, self.machine)
    }
}

/// Joins step descriptions with `", "`.
pub fn describe_steps(steps: &[ProcessStep]) -> String {
    steps
        .iter()
        .map(ProcessStep::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct `machine` values in first-occurrence order.
pub fn distinct_machines(steps: &[ProcessStep]) -> Vec<&str> {
    let mut seen = HashSet::new();
    steps
        .iter()
        .map(|s| s.machine.as_str())
        .filter(|m| seen.insert(*m))
        .collect()
}
