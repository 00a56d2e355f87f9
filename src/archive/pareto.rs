//! Incremental Pareto front over a solution archive.
//!
//! For vector-valued fitness, the front keeps every archived point that no
//! other member dominates. Streaming insertion applies the dominance test
//! incrementally; [`ParetoFront::finalize`] discards the streamed state and
//! replays the whole raw log in insertion order, which costs O(n · |front|)
//! and in exchange guarantees the final front is exactly the non-dominated
//! set of everything ever archived, independent of arrival order.
//!
//! Fitness-equal, solution-distinct points co-exist on the front: equality
//! in every dimension is "not dominated".
//!
//! # Reference
//! Deb (2001), "Multi-Objective Optimization Using Evolutionary Algorithms"

use std::hash::Hash;

use super::{Fitness, ObjectiveSense, SolutionArchive, TupleFitness};

/// A non-dominated set layered on a [`SolutionArchive`].
#[derive(Debug, Clone)]
pub struct ParetoFront<S> {
    archive: SolutionArchive<S>,
    front: Vec<(S, TupleFitness)>,
}

impl<S: Clone + Eq + Hash> ParetoFront<S> {
    /// Creates an empty front.
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            archive: SolutionArchive::new(sense),
            front: Vec::new(),
        }
    }

    /// Builds a front from existing entries and finalizes it.
    pub fn from_entries(
        entries: Vec<(S, Fitness)>,
        sense: ObjectiveSense,
        limit_store: bool,
        keep_best: usize,
    ) -> Self {
        let archive = SolutionArchive::from_entries(entries, sense, limit_store, keep_best);
        let mut pareto = Self {
            archive,
            front: Vec::new(),
        };
        pareto.finalize();
        pareto
    }

    /// Archives one evaluated solution; tuple fitness also streams through
    /// the dominance test into the front.
    pub fn insert(&mut self, solution: S, fitness: Fitness) {
        if let Fitness::Tuple(tuple) = &fitness {
            self.add_point(solution.clone(), tuple.clone());
        }
        self.archive.insert(solution, fitness);
    }

    /// Offers a point to the front.
    ///
    /// Accepted iff no current member dominates it; on acceptance every
    /// member the new point dominates is dropped. Returns whether the point
    /// entered the front.
    pub fn add_point(&mut self, solution: S, fitness: TupleFitness) -> bool {
        let sense = self.archive.sense();
        if self
            .front
            .iter()
            .any(|(_, member)| member.dominates(&fitness, sense))
        {
            return false;
        }
        self.front
            .retain(|(_, member)| !fitness.dominates(member, sense));
        self.front.push((solution, fitness));
        true
    }

    /// The current front members, in acceptance order.
    pub fn front(&self) -> &[(S, TupleFitness)] {
        &self.front
    }

    /// Number of front members.
    pub fn front_len(&self) -> usize {
        self.front.len()
    }

    /// Clears the front and rebuilds it by replaying every archived entry
    /// through the dominance test, in insertion order. Scalar entries are
    /// skipped. Also finalizes the underlying archive.
    pub fn finalize(&mut self) {
        self.archive.finalize();
        self.front.clear();
        let entries: Vec<(S, TupleFitness)> = self
            .archive
            .entries()
            .iter()
            .filter_map(|(s, f)| f.as_tuple().map(|t| (s.clone(), t.clone())))
            .collect();
        for (solution, fitness) in entries {
            self.add_point(solution, fitness);
        }
    }

    /// Per objective dimension, the front member best on that dimension
    /// alone; ties keep the first-encountered member.
    ///
    /// Dimension count is taken from the first front member.
    pub fn extreme_points(&self) -> Vec<(&S, &TupleFitness)> {
        let Some((_, first)) = self.front.first() else {
            return Vec::new();
        };
        let maximize = self.archive.sense().is_maximize();
        let mut extremes = Vec::with_capacity(first.len());
        for dim in 0..first.len() {
            let mut best: Option<&(S, TupleFitness)> = None;
            for member in &self.front {
                let value = member.1.values().get(dim).copied();
                let replace = match (&best, value) {
                    (_, None) => false,
                    (None, Some(_)) => true,
                    (Some(current), Some(v)) => {
                        let cur = current.1.values()[dim];
                        if maximize {
                            v > cur
                        } else {
                            v < cur
                        }
                    }
                };
                if replace {
                    best = Some(member);
                }
            }
            if let Some((s, f)) = best {
                extremes.push((s, f));
            }
        }
        extremes
    }

    /// The underlying archive (raw log, bounded best-set, best queries).
    pub fn archive(&self) -> &SolutionArchive<S> {
        &self.archive
    }

    /// Mutable access to the underlying archive.
    pub fn archive_mut(&mut self) -> &mut SolutionArchive<S> {
        &mut self.archive
    }
}
