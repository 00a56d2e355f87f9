//! Resource profile: materialized availability under consumption.
//!
//! The profile expands every resource into a time-indexed availability
//! vector over the planning horizon. Constant capacities are replicated,
//! calendars copied; any read past the end of a vector returns its last
//! entry, so a calendar's final value extends indefinitely.
//!
//! Consumption model:
//! - **Renewable** resources are decremented only over the occupied window
//!   `[start, start + duration)`. Units at and after the end time were never
//!   touched, which is exactly the release-at-end contract: capacity
//!   reappears the instant the activity completes.
//! - **Non-renewable** resources are decremented from `start` through the
//!   end of the vector (tail included), so the spent budget stays spent for
//!   the rest of the horizon.
//!
//! Feasibility of a candidate start is per-unit: for every resource the
//! activity uses and every time unit it would occupy, demand must not
//! exceed the remaining availability.

use std::collections::{HashMap, HashSet};

use crate::model::{Capacity, Resource};

/// Mutable per-resource availability over time.
#[derive(Debug, Clone)]
pub struct ResourceProfile {
    availability: HashMap<String, Vec<i32>>,
    non_renewable: HashSet<String>,
    horizon: i64,
}

impl ResourceProfile {
    /// Materializes availability vectors for `resources` over `[0, horizon)`.
    ///
    /// Every vector holds at least one entry so tail reads are defined even
    /// for a zero horizon.
    pub fn new(resources: &[Resource], horizon: i64) -> Self {
        let len = horizon.max(1) as usize;
        let mut availability = HashMap::with_capacity(resources.len());
        let mut non_renewable = HashSet::new();

        for resource in resources {
            let vector = match &resource.capacity {
                Capacity::Constant(c) => vec![*c; len],
                Capacity::Calendar(values) => {
                    let mut v: Vec<i32> = values.clone();
                    if v.is_empty() {
                        v.push(0);
                    }
                    let tail = v.last().copied().unwrap_or(0);
                    while v.len() < len {
                        v.push(tail);
                    }
                    v
                }
            };
            availability.insert(resource.name.clone(), vector);
            if !resource.is_renewable() {
                non_renewable.insert(resource.name.clone());
            }
        }

        Self {
            availability,
            non_renewable,
            horizon: horizon.max(1),
        }
    }

    /// Remaining availability of `resource` at `time`.
    ///
    /// Reads past the end of the vector return the last entry; unknown
    /// resources report zero.
    pub fn available(&self, resource: &str, time: i64) -> i32 {
        match self.availability.get(resource) {
            Some(v) => {
                let idx = (time.max(0) as usize).min(v.len() - 1);
                v[idx]
            }
            None => 0,
        }
    }

    /// Whether `demand` fits at `start` for `duration` time units.
    ///
    /// A zero-duration window occupies nothing and is always feasible.
    /// Demand on a resource the profile does not know is never feasible.
    pub fn is_feasible(&self, demand: &HashMap<String, i32>, start: i64, duration: i64) -> bool {
        for (resource, &amount) in demand {
            if amount == 0 || duration == 0 {
                continue;
            }
            let Some(vector) = self.availability.get(resource) else {
                return false;
            };
            for t in start..start + duration {
                let idx = (t.max(0) as usize).min(vector.len() - 1);
                if amount > vector[idx] {
                    return false;
                }
            }
        }
        true
    }

    /// Commits `demand` over `[start, start + duration)`.
    ///
    /// Renewable units are decremented only inside the window; non-renewable
    /// units are decremented through the end of the vector and never return.
    /// Unknown resource names are ignored (validation rejects them before
    /// any profile exists).
    pub fn commit(&mut self, demand: &HashMap<String, i32>, start: i64, duration: i64) {
        let end = start + duration;
        for (resource, &amount) in demand {
            if amount == 0 {
                continue;
            }
            let non_renewable = self.non_renewable.contains(resource);
            let Some(vector) = self.availability.get_mut(resource) else {
                continue;
            };
            // Keep one untouched unit past the window so tail reads still
            // see post-release capacity for renewables.
            let needed = (end.max(0) as usize) + 1;
            let tail = vector.last().copied().unwrap_or(0);
            while vector.len() < needed {
                vector.push(tail);
            }
            let from = start.max(0) as usize;
            let to = if non_renewable {
                vector.len()
            } else {
                end.max(0) as usize
            };
            for unit in &mut vector[from..to] {
                *unit -= amount;
            }
        }
    }

    /// Remaining budget of a non-renewable resource (its tail value).
    pub fn remaining(&self, resource: &str) -> i32 {
        self.availability
            .get(resource)
            .and_then(|v| v.last().copied())
            .unwrap_or(0)
    }

    /// Planning horizon the profile was materialized for.
    #[inline]
    pub fn horizon(&self) -> i64 {
        self.horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(entries: &[(&str, i32)]) -> HashMap<String, i32> {
        entries
            .iter()
            .map(|(name, amount)| (name.to_string(), *amount))
            .collect()
    }

    fn one_renewable(capacity: i32) -> ResourceProfile {
        ResourceProfile::new(&[Resource::renewable("R1", capacity)], 10)
    }

    #[test]
    fn test_constant_availability() {
        let profile = one_renewable(4);
        assert_eq!(profile.available("R1", 0), 4);
        assert_eq!(profile.available("R1", 9), 4);
        assert_eq!(profile.available("R1", 100), 4);
        assert_eq!(profile.available("R9", 0), 0);
    }

    #[test]
    fn test_calendar_tail_extension() {
        let resources = [Resource::renewable("R1", 0).with_calendar(vec![3, 1])];
        let profile = ResourceProfile::new(&resources, 5);
        assert_eq!(profile.available("R1", 0), 3);
        assert_eq!(profile.available("R1", 1), 1);
        assert_eq!(profile.available("R1", 4), 1);
        assert_eq!(profile.available("R1", 400), 1);
    }

    #[test]
    fn test_renewable_commit_releases_at_end() {
        let mut profile = one_renewable(2);
        profile.commit(&demand(&[("R1", 2)]), 1, 3);

        assert_eq!(profile.available("R1", 0), 2);
        assert_eq!(profile.available("R1", 1), 0);
        assert_eq!(profile.available("R1", 3), 0);
        // End of the window: units are back.
        assert_eq!(profile.available("R1", 4), 2);
    }

    #[test]
    fn test_feasibility_per_unit() {
        let mut profile = one_renewable(2);
        profile.commit(&demand(&[("R1", 1)]), 0, 4);

        assert!(profile.is_feasible(&demand(&[("R1", 1)]), 0, 4));
        assert!(!profile.is_feasible(&demand(&[("R1", 2)]), 0, 1));
        assert!(profile.is_feasible(&demand(&[("R1", 2)]), 4, 3));
        // Straddling the release point fails on the occupied units.
        assert!(!profile.is_feasible(&demand(&[("R1", 2)]), 3, 2));
    }

    #[test]
    fn test_unknown_resource_infeasible() {
        let profile = one_renewable(2);
        assert!(!profile.is_feasible(&demand(&[("R9", 1)]), 0, 1));
        assert!(profile.is_feasible(&demand(&[("R9", 0)]), 0, 1));
    }

    #[test]
    fn test_zero_duration_always_feasible() {
        let mut profile = one_renewable(1);
        profile.commit(&demand(&[("R1", 1)]), 0, 2);
        // An empty window occupies no units at all.
        assert!(profile.is_feasible(&demand(&[("R1", 1)]), 1, 0));
    }

    #[test]
    fn test_non_renewable_never_returns() {
        let resources = [Resource::non_renewable("NR", 5)];
        let mut profile = ResourceProfile::new(&resources, 10);

        profile.commit(&demand(&[("NR", 3)]), 2, 4);
        assert_eq!(profile.available("NR", 0), 5);
        assert_eq!(profile.available("NR", 2), 2);
        // Long after the window the budget stays spent.
        assert_eq!(profile.available("NR", 9), 2);
        assert_eq!(profile.available("NR", 500), 2);
        assert_eq!(profile.remaining("NR"), 2);

        profile.commit(&demand(&[("NR", 2)]), 6, 1);
        assert_eq!(profile.remaining("NR"), 0);
        assert!(!profile.is_feasible(&demand(&[("NR", 1)]), 8, 1));
    }

    #[test]
    fn test_commit_beyond_horizon_extends() {
        let mut profile = one_renewable(3);
        profile.commit(&demand(&[("R1", 3)]), 12, 4);
        assert_eq!(profile.available("R1", 12), 0);
        assert_eq!(profile.available("R1", 15), 0);
        assert_eq!(profile.available("R1", 16), 3);
    }

}
