//! Activity and execution-mode model.
//!
//! An activity is the smallest schedulable unit of a project. It carries one
//! or more execution modes; a mode fixes the activity's duration and its
//! per-resource demand. Single-mode instances simply have one mode per
//! activity.
//!
//! Two sentinel activities bound every project: a `source` that precedes all
//! work and a `sink` that follows it, both with zero duration and zero
//! demand.
//!
//! # Reference
//! Kolisch & Hartmann (2006), "Experimental investigation of heuristics for
//! resource-constrained project scheduling"

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Activity identifier. Sentinels use ordinary ids; the project records
/// which two ids are `source` and `sink`.
pub type ActivityId = u32;

/// Execution-mode identifier, unique within one activity.
pub type ModeId = u32;

/// One way of executing an activity: a duration plus the demand it places on
/// each resource while running.
///
/// Resources absent from `demand` are not consumed. Demand on a renewable
/// resource is held for the activity's whole processing window; demand on a
/// non-renewable resource is consumed once, for the rest of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMode {
    /// Processing time in whole time units.
    pub duration: i64,
    /// Units of each resource consumed while the activity runs.
    pub demand: HashMap<String, i32>,
}

impl ExecutionMode {
    /// Creates a mode with the given duration and no resource demand.
    pub fn new(duration: i64) -> Self {
        Self {
            duration,
            demand: HashMap::new(),
        }
    }

    /// Adds a demand entry for one resource.
    pub fn with_demand(mut self, resource: impl Into<String>, amount: i32) -> Self {
        self.demand.insert(resource.into(), amount);
        self
    }

    /// Demand placed on `resource`; zero when the mode does not use it.
    #[inline]
    pub fn demand_for(&self, resource: &str) -> i32 {
        self.demand.get(resource).copied().unwrap_or(0)
    }
}

/// A mode choice per activity, fixed before schedule generation.
///
/// The serial generator runs against exactly one mode per activity; mode
/// *selection* belongs to the external solvers that drive it. Activities
/// missing from the assignment fall back to [`DEFAULT_MODE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeAssignment {
    modes: HashMap<ActivityId, ModeId>,
}

/// Mode used for activities without an explicit assignment.
pub const DEFAULT_MODE: ModeId = 1;

impl ModeAssignment {
    /// Creates an empty assignment (every activity on [`DEFAULT_MODE`]).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mode for one activity.
    pub fn with_mode(mut self, activity: ActivityId, mode: ModeId) -> Self {
        self.modes.insert(activity, mode);
        self
    }

    /// Sets the mode for one activity in place.
    pub fn set(&mut self, activity: ActivityId, mode: ModeId) {
        self.modes.insert(activity, mode);
    }

    /// Mode selected for `activity`.
    #[inline]
    pub fn mode_of(&self, activity: ActivityId) -> ModeId {
        self.modes.get(&activity).copied().unwrap_or(DEFAULT_MODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_builder() {
        let mode = ExecutionMode::new(4)
            .with_demand("R1", 2)
            .with_demand("R2", 1);

        assert_eq!(mode.duration, 4);
        assert_eq!(mode.demand_for("R1"), 2);
        assert_eq!(mode.demand_for("R2"), 1);
        assert_eq!(mode.demand_for("R3"), 0);
    }

    #[test]
    fn test_zero_duration_mode() {
        let mode = ExecutionMode::new(0);
        assert_eq!(mode.duration, 0);
        assert!(mode.demand.is_empty());
    }

    #[test]
    fn test_mode_assignment_default() {
        let assignment = ModeAssignment::new();
        assert_eq!(assignment.mode_of(7), DEFAULT_MODE);
    }

    #[test]
    fn test_mode_assignment_override() {
        let assignment = ModeAssignment::new().with_mode(3, 2);
        assert_eq!(assignment.mode_of(3), 2);
        assert_eq!(assignment.mode_of(4), DEFAULT_MODE);
    }

    #[test]
    fn test_mode_serde_roundtrip() {
        let mode = ExecutionMode::new(5).with_demand("R1", 3);
        let json = serde_json::to_string(&mode).unwrap();
        let back: ExecutionMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mode);
    }
}
