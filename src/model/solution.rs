//! Schedule solutions and partial schedules.
//!
//! A [`ScheduleSolution`] is the output of the serial generator: a complete
//! activity → time-window map plus the scheduling-order permutation and the
//! mode vector that produced it. Archives treat solutions as opaque,
//! hashable values; nothing in the ranking layer inspects the schedule.
//!
//! A [`PartialSchedule`] fixes start/end times for a subset of activities
//! (typically handed down by an upstream optimizer) and seeds the generator
//! before its event loop starts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{ActivityId, ModeId};

/// Half-open processing window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First occupied time unit.
    pub start: i64,
    /// First time unit after processing.
    pub end: i64,
}

impl TimeWindow {
    /// Creates a window.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A complete schedule produced by the generator.
///
/// Hash/equality cover the full schedule map, permutation, and modes, so
/// archives can deduplicate by solution identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleSolution {
    /// Processing window per activity, sentinels included.
    pub schedule: BTreeMap<ActivityId, TimeWindow>,
    /// Non-sentinel activities in the order the generator committed them.
    pub permutation: Vec<ActivityId>,
    /// Mode chosen per non-sentinel activity, in instance order.
    pub modes: Vec<ModeId>,
    /// Whether the generator certified the schedule feasible.
    pub feasible: bool,
}

impl ScheduleSolution {
    /// Window of one activity.
    pub fn window(&self, id: ActivityId) -> Option<TimeWindow> {
        self.schedule.get(&id).copied()
    }

    /// Start time of one activity.
    pub fn start_of(&self, id: ActivityId) -> Option<i64> {
        self.window(id).map(|w| w.start)
    }

    /// End time of one activity.
    pub fn end_of(&self, id: ActivityId) -> Option<i64> {
        self.window(id).map(|w| w.end)
    }

    /// Latest end time across all scheduled activities.
    pub fn makespan(&self) -> i64 {
        self.schedule.values().map(|w| w.end).max().unwrap_or(0)
    }

    /// Whether every one of `expected` activities has a window.
    pub fn is_complete(&self, expected: usize) -> bool {
        self.schedule.len() == expected
    }
}

/// Fixed start/end times for a subset of activities.
///
/// Entries with a start but no end get their end derived from the selected
/// mode's duration at seeding time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSchedule {
    /// Fixed start times.
    pub start_times: HashMap<ActivityId, i64>,
    /// Fixed end times.
    pub end_times: HashMap<ActivityId, i64>,
}

impl PartialSchedule {
    /// Creates an empty partial schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes an activity's start time.
    pub fn with_start(mut self, id: ActivityId, start: i64) -> Self {
        self.start_times.insert(id, start);
        self
    }

    /// Fixes an activity's full window.
    pub fn with_window(mut self, id: ActivityId, start: i64, end: i64) -> Self {
        self.start_times.insert(id, start);
        self.end_times.insert(id, end);
        self
    }

    /// Whether no activity is fixed.
    pub fn is_empty(&self) -> bool {
        self.start_times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_solution() -> ScheduleSolution {
        let mut schedule = BTreeMap::new();
        schedule.insert(0, TimeWindow::new(0, 0));
        schedule.insert(1, TimeWindow::new(0, 2));
        schedule.insert(2, TimeWindow::new(2, 5));
        schedule.insert(3, TimeWindow::new(5, 5));
        ScheduleSolution {
            schedule,
            permutation: vec![1, 2],
            modes: vec![1, 1],
            feasible: true,
        }
    }

    #[test]
    fn test_window_duration() {
        let w = TimeWindow::new(3, 8);
        assert_eq!(w.duration(), 5);
    }

    #[test]
    fn test_makespan() {
        let s = sample_solution();
        assert_eq!(s.makespan(), 5);
        assert_eq!(s.start_of(2), Some(2));
        assert_eq!(s.end_of(9), None);
    }

    #[test]
    fn test_completeness() {
        let s = sample_solution();
        assert!(s.is_complete(4));
        assert!(!s.is_complete(5));
    }

    #[test]
    fn test_solution_identity() {
        use std::collections::HashSet;

        let a = sample_solution();
        let b = sample_solution();
        let mut c = sample_solution();
        c.permutation = vec![2, 1];

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_partial_schedule_builder() {
        let p = PartialSchedule::new()
            .with_window(1, 0, 2)
            .with_start(2, 4);
        assert_eq!(p.start_times[&1], 0);
        assert_eq!(p.end_times[&1], 2);
        assert_eq!(p.start_times[&2], 4);
        assert!(!p.end_times.contains_key(&2));
        assert!(!p.is_empty());
    }

    #[test]
    fn test_solution_serde_roundtrip() {
        let s = sample_solution();
        let json = serde_json::to_string(&s).unwrap();
        let back: ScheduleSolution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
