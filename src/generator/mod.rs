//! Serial schedule generation.
//!
//! A discrete-event serial SGS: starting from the `source` sentinel, the
//! generator repeatedly picks an eligible (all predecessors scheduled),
//! resource-feasible activity under the active priority rule, commits it at
//! the current simulated time, and advances time through a min-ordered
//! queue of completion events. The result is always precedence- and
//! capacity-feasible; when the instance cannot be completed (a mode demands
//! more than a resource ever offers), generation fails with a
//! [`GeneratorError::ConstructionStall`] instead of looping.
//!
//! Priority rules form a closed set — see [`GreedyChoice`]. A pre-supplied
//! [`PartialSchedule`] seeds fixed windows (and their resource consumption)
//! before the event loop starts; a supplied priority permutation can replace
//! the greedy rule entirely via
//! [`SerialScheduleGenerator::schedule_with_priority_list`], which is the
//! decoder used by permutation-encoding solvers.
//!
//! # Reference
//! Kolisch (1996), "Serial and parallel resource-constrained project
//! scheduling methods revisited"

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};

use rand::prelude::IndexedRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::model::{
    ActivityId, ExecutionMode, ModeAssignment, PartialSchedule, Project, ScheduleSolution,
    TimeWindow,
};
use crate::precedence::{ModelError, PrecedenceIndex};
use crate::profile::ResourceProfile;

/// Priority rule applied in the selection phase.
///
/// Deterministic rules break ties toward the lowest activity id so replays
/// are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreedyChoice {
    /// Most remaining transitive successors first (critical-path flavored).
    #[default]
    MostSuccessors,
    /// Random choice weighted by successor count; uniform when all
    /// candidate weights are zero.
    SampleMostSuccessors,
    /// Shortest mode duration first.
    Fastest,
    /// Uniform random choice among eligible-feasible activities.
    Random,
}

/// Failures during schedule construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// No eligible resource-feasible activity exists, nothing is running,
    /// and availability can no longer change: the instance cannot be
    /// completed with the selected modes.
    #[error(
        "construction stalled at time {time}: {scheduled} of {total} activities scheduled \
         and no completion pending"
    )]
    ConstructionStall {
        /// Simulated time at which the stall was established.
        time: i64,
        /// Activities already holding a schedule entry.
        scheduled: usize,
        /// Total activities in the project.
        total: usize,
    },
}

/// Serial schedule generator over one project instance.
///
/// Construction builds the precedence index once; each `generate*` call runs
/// an independent simulation and produces one feasible schedule.
#[derive(Debug, Clone)]
pub struct SerialScheduleGenerator<'a> {
    project: &'a Project,
    index: PrecedenceIndex,
    modes: ModeAssignment,
}

impl<'a> SerialScheduleGenerator<'a> {
    /// Creates a generator, building the precedence index.
    ///
    /// Fails on a cyclic graph or dangling successor references.
    pub fn new(project: &'a Project) -> Result<Self, ModelError> {
        let index = PrecedenceIndex::build(project)?;
        let modes = project.default_modes();
        Ok(Self {
            project,
            index,
            modes,
        })
    }

    /// Replaces the default (lowest-id) mode assignment.
    pub fn with_modes(mut self, modes: ModeAssignment) -> Self {
        self.modes = modes;
        self
    }

    /// The precedence index built for this project.
    pub fn index(&self) -> &PrecedenceIndex {
        &self.index
    }

    /// Generates one schedule under `rule`.
    pub fn generate<R: Rng>(
        &self,
        rule: GreedyChoice,
        rng: &mut R,
    ) -> Result<ScheduleSolution, GeneratorError> {
        self.generate_with_partial(rule, &PartialSchedule::new(), rng)
    }

    /// Generates one schedule under `rule`, honoring fixed windows from
    /// `partial`.
    ///
    /// Seeded activities are committed up front: their windows enter the
    /// schedule, their resource demand is consumed, and their completions
    /// unlock successors exactly like simulated activities.
    pub fn generate_with_partial<R: Rng>(
        &self,
        rule: GreedyChoice,
        partial: &PartialSchedule,
        rng: &mut R,
    ) -> Result<ScheduleSolution, GeneratorError> {
        self.simulate(&self.modes, partial, |candidates| {
            self.select(rule, candidates, rng)
        })
    }

    /// Decodes a priority permutation into a schedule: at every instant the
    /// eligible-feasible activity earliest in `order` starts first.
    ///
    /// Activities absent from `order` rank last (lowest priority), ties by
    /// lowest id. This is the schedule builder behind permutation-encoded
    /// solvers.
    pub fn schedule_with_priority_list(
        &self,
        order: &[ActivityId],
        modes: &ModeAssignment,
    ) -> Result<ScheduleSolution, GeneratorError> {
        let rank: HashMap<ActivityId, usize> = order
            .iter()
            .enumerate()
            .map(|(position, &id)| (id, position))
            .collect();
        self.simulate(modes, &PartialSchedule::new(), |candidates| {
            candidates
                .iter()
                .copied()
                .min_by_key(|&a| (rank.get(&a).copied().unwrap_or(usize::MAX), a))
        })
    }

    /// One selection under `rule` from a non-empty candidate slice.
    fn select<R: Rng>(
        &self,
        rule: GreedyChoice,
        candidates: &[ActivityId],
        rng: &mut R,
    ) -> Option<ActivityId> {
        match rule {
            GreedyChoice::MostSuccessors => candidates
                .iter()
                .copied()
                .max_by_key(|&a| (self.index.successor_count(a), Reverse(a))),
            GreedyChoice::SampleMostSuccessors => {
                match candidates.choose_weighted(rng, |&a| self.index.successor_count(a) as f64) {
                    Ok(&chosen) => Some(chosen),
                    // All weights zero: fall back to a uniform draw.
                    Err(_) => candidates.choose(rng).copied(),
                }
            }
            GreedyChoice::Fastest => candidates
                .iter()
                .copied()
                .min_by_key(|&a| (self.duration_of(&self.modes, a), a)),
            GreedyChoice::Random => candidates.choose(rng).copied(),
        }
    }

    fn mode_of(&self, modes: &ModeAssignment, id: ActivityId) -> Option<&ExecutionMode> {
        self.project.mode(id, modes.mode_of(id))
    }

    fn duration_of(&self, modes: &ModeAssignment, id: ActivityId) -> i64 {
        self.mode_of(modes, id).map(|m| m.duration).unwrap_or(0)
    }

    /// Eligible activities whose demand fits at `time`, sorted by id for
    /// deterministic iteration.
    fn feasible_candidates(
        &self,
        modes: &ModeAssignment,
        available: &HashSet<ActivityId>,
        profile: &ResourceProfile,
        time: i64,
    ) -> Vec<ActivityId> {
        let mut candidates: Vec<ActivityId> = available
            .iter()
            .copied()
            .filter(|&id| match self.mode_of(modes, id) {
                Some(mode) => profile.is_feasible(&mode.demand, time, mode.duration),
                None => true,
            })
            .collect();
        candidates.sort_unstable();
        candidates
    }

    /// Marks `activity` completed: decrements the pending-ancestor counter
    /// of every descendant and flags newly unblocked ones as available.
    fn complete(
        &self,
        activity: ActivityId,
        pending: &mut HashMap<ActivityId, usize>,
        schedule: &BTreeMap<ActivityId, TimeWindow>,
        available: &mut HashSet<ActivityId>,
    ) {
        let Ok(descendants) = self.index.descendants(activity) else {
            return;
        };
        for &d in descendants {
            if let Some(count) = pending.get_mut(&d) {
                if *count > 0 {
                    *count -= 1;
                    if *count == 0 && !schedule.contains_key(&d) {
                        available.insert(d);
                    }
                }
            }
        }
    }

    /// The event loop shared by the greedy rules and the priority-list
    /// decoder.
    fn simulate(
        &self,
        modes: &ModeAssignment,
        partial: &PartialSchedule,
        mut pick: impl FnMut(&[ActivityId]) -> Option<ActivityId>,
    ) -> Result<ScheduleSolution, GeneratorError> {
        let project = self.project;
        let total = project.len();
        let mut profile = ResourceProfile::new(&project.resources, project.horizon);
        let mut schedule: BTreeMap<ActivityId, TimeWindow> = BTreeMap::new();
        let mut queue: BinaryHeap<Reverse<(i64, ActivityId)>> = BinaryHeap::new();
        let mut permutation: Vec<ActivityId> = Vec::new();
        let mut pending: HashMap<ActivityId, usize> = project
            .activities
            .iter()
            .map(|&id| (id, self.index.predecessor_count(id)))
            .collect();
        let mut available: HashSet<ActivityId> = HashSet::new();

        // Seed fixed windows: committed like simulated activities, with a
        // completion event so successors unlock at the right time.
        let mut seeded_max_end: i64 = 0;
        for (&id, &start) in &partial.start_times {
            if !pending.contains_key(&id) {
                continue; // not part of this project
            }
            let end = partial
                .end_times
                .get(&id)
                .copied()
                .unwrap_or_else(|| start + self.duration_of(modes, id));
            schedule.insert(id, TimeWindow::new(start, end));
            if let Some(mode) = self.mode_of(modes, id) {
                profile.commit(&mode.demand, start, end - start);
            }
            queue.push(Reverse((end, id)));
            seeded_max_end = seeded_max_end.max(end);
        }

        if !schedule.contains_key(&project.source) {
            schedule.insert(project.source, TimeWindow::new(0, 0));
            // The zero-duration source completes the instant it starts.
            self.complete(project.source, &mut pending, &schedule, &mut available);
        }
        for &id in &project.activities {
            if !schedule.contains_key(&id) && pending.get(&id).copied().unwrap_or(0) == 0 {
                available.insert(id);
            }
        }

        // Past this time every availability vector is constant, so an empty
        // queue with nothing feasible can never recover.
        let total_duration: i64 = project
            .activities
            .iter()
            .map(|&id| self.duration_of(modes, id))
            .sum();
        let stall_bound = project
            .horizon
            .max(profile.horizon())
            .max(seeded_max_end)
            + total_duration
            + 1;

        let mut current_time: i64 = 0;

        while schedule.len() < total {
            let mut possible = self.feasible_candidates(modes, &available, &profile, current_time);
            trace!(
                time = current_time,
                candidates = possible.len(),
                "selection phase"
            );
            while !possible.is_empty() {
                let Some(next) = pick(&possible) else {
                    break;
                };
                available.remove(&next);
                if !project.is_sentinel(next) {
                    permutation.push(next);
                }
                let duration = self.duration_of(modes, next);
                let end = current_time + duration;
                schedule.insert(next, TimeWindow::new(current_time, end));
                if let Some(mode) = self.mode_of(modes, next) {
                    profile.commit(&mode.demand, current_time, duration);
                }
                queue.push(Reverse((end, next)));
                trace!(activity = next, start = current_time, end, "committed");
                possible = self.feasible_candidates(modes, &available, &profile, current_time);
            }

            if let Some(Reverse((time, activity))) = queue.pop() {
                // Renewable capacity held by `activity` is back from `time`
                // on; the profile never decremented units past its window.
                current_time = time;
                self.complete(activity, &mut pending, &schedule, &mut available);
            } else {
                // Calendar gap: nothing running, nothing fits right now.
                current_time += 1;
                if current_time > stall_bound {
                    debug!(
                        time = current_time,
                        scheduled = schedule.len(),
                        total,
                        "construction stalled"
                    );
                    return Err(GeneratorError::ConstructionStall {
                        time: current_time,
                        scheduled: schedule.len(),
                        total,
                    });
                }
            }
        }

        debug!(
            scheduled = schedule.len(),
            time = current_time,
            "serial generation complete"
        );

        let mode_vector = project
            .non_dummy_activities()
            .map(|id| modes.mode_of(id))
            .collect();
        Ok(ScheduleSolution {
            schedule,
            permutation,
            modes: mode_vector,
            feasible: true,
        })
    }
}
