//! Resource model.
//!
//! A resource is a named capacity that activities draw on while they run.
//! Renewable resources get their units back the moment the consuming
//! activity ends; non-renewable resources are a single budget for the whole
//! horizon.
//!
//! Capacity is either a constant or a calendar: a finite time-indexed
//! sequence of per-unit capacities. Queries beyond the end of a calendar
//! repeat its last entry indefinitely (a shrinking night shift does not
//! suddenly become a zero-capacity or unbounded resource past the data).
//!
//! # Reference
//! Kolisch & Hartmann (2006), §2: resource categories in RCPSP variants

use serde::{Deserialize, Serialize};

/// Replenishment behavior of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Units return to the pool when the consuming activity ends.
    Renewable,
    /// Units are consumed once, for the whole horizon.
    NonRenewable,
}

/// Per-unit capacity of a resource over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Capacity {
    /// Same capacity at every time unit.
    Constant(i32),
    /// Time-indexed capacities; the last entry extends indefinitely.
    Calendar(Vec<i32>),
}

impl Capacity {
    /// Capacity at time `time`.
    ///
    /// Calendar queries past the final entry return the final entry; an
    /// empty calendar reports zero (and is rejected by validation).
    pub fn at(&self, time: i64) -> i32 {
        match self {
            Capacity::Constant(c) => *c,
            Capacity::Calendar(values) => {
                if values.is_empty() {
                    return 0;
                }
                let idx = (time.max(0) as usize).min(values.len() - 1);
                values[idx]
            }
        }
    }

    /// Largest capacity value over the whole horizon.
    pub fn peak(&self) -> i32 {
        match self {
            Capacity::Constant(c) => *c,
            Capacity::Calendar(values) => values.iter().copied().max().unwrap_or(0),
        }
    }
}

/// A named, capacitated resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource name, referenced by mode demand tables.
    pub name: String,
    /// Replenishment behavior.
    pub kind: ResourceKind,
    /// Available units per time unit.
    pub capacity: Capacity,
}

impl Resource {
    /// Creates a renewable resource with constant capacity.
    pub fn renewable(name: impl Into<String>, capacity: i32) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::Renewable,
            capacity: Capacity::Constant(capacity),
        }
    }

    /// Creates a non-renewable resource with a fixed budget.
    pub fn non_renewable(name: impl Into<String>, capacity: i32) -> Self {
        Self {
            name: name.into(),
            kind: ResourceKind::NonRenewable,
            capacity: Capacity::Constant(capacity),
        }
    }

    /// Replaces the capacity with a calendar.
    pub fn with_calendar(mut self, values: Vec<i32>) -> Self {
        self.capacity = Capacity::Calendar(values);
        self
    }

    /// Whether the resource is renewable.
    #[inline]
    pub fn is_renewable(&self) -> bool {
        self.kind == ResourceKind::Renewable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_capacity() {
        let cap = Capacity::Constant(4);
        assert_eq!(cap.at(0), 4);
        assert_eq!(cap.at(1_000_000), 4);
        assert_eq!(cap.peak(), 4);
    }

    #[test]
    fn test_calendar_tail_extension() {
        let cap = Capacity::Calendar(vec![3, 3, 1, 2]);
        assert_eq!(cap.at(0), 3);
        assert_eq!(cap.at(2), 1);
        assert_eq!(cap.at(3), 2);
        // Beyond the data: last entry repeats forever.
        assert_eq!(cap.at(4), 2);
        assert_eq!(cap.at(500), 2);
    }

    #[test]
    fn test_empty_calendar_is_zero() {
        let cap = Capacity::Calendar(vec![]);
        assert_eq!(cap.at(0), 0);
        assert_eq!(cap.peak(), 0);
    }

    #[test]
    fn test_negative_time_clamps_to_start() {
        let cap = Capacity::Calendar(vec![5, 1]);
        assert_eq!(cap.at(-3), 5);
    }

    #[test]
    fn test_resource_builders() {
        let r = Resource::renewable("R1", 4);
        assert!(r.is_renewable());
        assert_eq!(r.capacity.at(9), 4);

        let n = Resource::non_renewable("NR1", 20);
        assert!(!n.is_renewable());

        let c = Resource::renewable("R2", 0).with_calendar(vec![2, 0, 2]);
        assert_eq!(c.capacity.at(1), 0);
        assert_eq!(c.capacity.at(7), 2);
    }
}
