//! Bounded, ranked storage of evaluated solutions.
//!
//! External solvers (CP, LP, GA, LNS) evaluate many candidate solutions per
//! run; the [`SolutionArchive`] is the shared structure they all push into.
//! It keeps:
//!
//! - the **raw log**: every `(solution, fitness)` pair ever inserted, in
//!   insertion order;
//! - a **deduplicated bounded best-set**: the K fittest distinct fitness
//!   values seen so far, maintained as a heap with O(log K) insertion
//!   (classic streaming top-K, so memory stays bounded under long searches);
//! - **running bounds** `running_min`/`running_max`, widened on every
//!   distinct insertion *regardless of retention* — the retention gate can
//!   therefore loosen even when an entry itself is evicted. The bounds are
//!   deliberately separate from the best-set's own extremes;
//! - the incumbent **best solution**, updated in O(1) per insertion.
//!
//! Tie-breaking is deterministic and documented per query: [`best`] keeps
//! the lowest insertion index, [`last_best`] the highest — the divergence
//! is intentional, matching how restart-style and continuation-style
//! solvers want to resume.
//!
//! Queries on an empty archive return `None`; an empty archive is a normal
//! transient state early in a search, not an error.
//!
//! [`best`]: SolutionArchive::best
//! [`last_best`]: SolutionArchive::last_best

mod fitness;
mod pareto;

pub use fitness::{Fitness, ObjectiveSense, TupleFitness};
pub use pareto::ParetoFront;

use rand::prelude::IndexedRandom;
use rand::Rng;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;

/// Heap key ordered so that "greater" always means "better fitness",
/// whatever the archive's sense. The bounded best-set is a min-heap over
/// these, keeping the worst retained value on top.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Ranked {
    fitness: Fitness,
    maximize: bool,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        let ord = self.fitness.total_cmp(&other.fitness);
        if self.maximize {
            ord
        } else {
            ord.reverse()
        }
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Default best-set capacity, matching long-running search workloads.
pub const DEFAULT_KEEP_BEST: usize = 1000;

/// Append-ordered, deduplicated, bounded archive of evaluated solutions.
///
/// Solutions are opaque: the archive only uses identity (`Eq + Hash`) for
/// deduplication and never inspects their structure.
#[derive(Debug, Clone)]
pub struct SolutionArchive<S> {
    entries: Vec<(S, Fitness)>,
    seen: HashSet<S>,
    heap: BinaryHeap<Reverse<Ranked>>,
    frozen_best: Option<Vec<Fitness>>,
    sense: ObjectiveSense,
    limit_store: bool,
    keep_best: usize,
    running_min: Option<Fitness>,
    running_max: Option<Fitness>,
    best: Option<(S, Fitness)>,
}

impl<S: Clone + Eq + Hash> SolutionArchive<S> {
    /// Creates an empty archive with the default best-set capacity.
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            entries: Vec::new(),
            seen: HashSet::new(),
            heap: BinaryHeap::new(),
            frozen_best: None,
            sense,
            limit_store: true,
            keep_best: DEFAULT_KEEP_BEST,
            running_min: None,
            running_max: None,
            best: None,
        }
    }

    /// Sets the best-set capacity.
    pub fn with_keep_best(mut self, keep_best: usize) -> Self {
        self.keep_best = keep_best;
        self
    }

    /// Disables the best-set size limit.
    pub fn unbounded(mut self) -> Self {
        self.limit_store = false;
        self
    }

    /// Builds an archive from existing entries.
    ///
    /// Distinct entries populate the best-set; when the distinct count
    /// reaches `keep_best` and the limit is enabled, the set is truncated
    /// to exactly the `keep_best` fittest values. Running bounds cover the
    /// *retained* set; the incumbent best covers *all* entries.
    pub fn from_entries(
        entries: Vec<(S, Fitness)>,
        sense: ObjectiveSense,
        limit_store: bool,
        keep_best: usize,
    ) -> Self {
        let mut archive = Self::new(sense);
        archive.limit_store = limit_store;
        archive.keep_best = keep_best;
        archive.entries = entries;
        archive.rebuild();
        archive.retruncate();
        archive
    }

    /// Inserts one evaluated solution.
    ///
    /// The raw log grows by exactly one entry per call. Solutions already
    /// seen (by identity) do not touch the best-set or the bounds again.
    /// For a new identity: the fitness enters the best-set when the set is
    /// below capacity, or replaces the worst retained value when it is at
    /// least as good as the current worst retained bound; the running
    /// bounds then widen unconditionally, retained or not.
    pub fn insert(&mut self, solution: S, fitness: Fitness) {
        self.entries.push((solution.clone(), fitness.clone()));
        if !self.seen.insert(solution.clone()) {
            return;
        }

        // O(1) incumbent update against the running bound.
        let incumbent_bound = if self.sense.is_maximize() {
            self.running_max.as_ref()
        } else {
            self.running_min.as_ref()
        };
        let strictly_better = match incumbent_bound {
            Some(bound) => self.sense.better(&fitness, bound),
            None => true,
        };
        if strictly_better || self.best.is_none() {
            self.best = Some((solution, fitness.clone()));
        }

        // Bounded top-K retention.
        let worst_bound = if self.sense.is_maximize() {
            self.running_min.as_ref()
        } else {
            self.running_max.as_ref()
        };
        let passes_gate = match worst_bound {
            Some(bound) => self.sense.at_least_as_good(&fitness, bound),
            None => true,
        };
        let ranked = Reverse(Ranked {
            fitness: fitness.clone(),
            maximize: self.sense.is_maximize(),
        });
        if !self.limit_store || self.heap.len() < self.keep_best {
            self.heap.push(ranked);
        } else if passes_gate {
            // Push-pop: the worst of (retained ∪ {fitness}) drops out.
            self.heap.push(ranked);
            self.heap.pop();
        }
        self.frozen_best = None;

        // Widen the running range whether or not the value was retained.
        self.running_min = Some(match self.running_min.take() {
            Some(min) => min.min(fitness.clone()),
            None => fitness.clone(),
        });
        self.running_max = Some(match self.running_max.take() {
            Some(max) => max.max(fitness),
            None => fitness,
        });
    }

    /// Best entry over the whole raw log; ties keep the lowest insertion
    /// index. `None` on an empty archive.
    pub fn best(&self) -> Option<(&S, &Fitness)> {
        let mut out: Option<&(S, Fitness)> = None;
        for entry in &self.entries {
            let replace = match out {
                Some(current) => self.sense.better(&entry.1, &current.1),
                None => true,
            };
            if replace {
                out = Some(entry);
            }
        }
        out.map(|(s, f)| (s, f))
    }

    /// The incumbent best, maintained in O(1) per insertion.
    pub fn best_solution(&self) -> Option<(&S, &Fitness)> {
        self.best.as_ref().map(|(s, f)| (s, f))
    }

    /// Among entries tied for the best fitness, the one inserted last.
    pub fn last_best(&self) -> Option<(&S, &Fitness)> {
        let best_fitness = self.best()?.1.clone();
        self.entries
            .iter()
            .rev()
            .find(|(_, f)| *f == best_fitness)
            .map(|(s, f)| (s, f))
    }

    /// Uniform random choice among entries tied for the best fitness.
    pub fn random_best<R: Rng>(&self, rng: &mut R) -> Option<(&S, &Fitness)> {
        let best_fitness = self.best()?.1.clone();
        let tied: Vec<&(S, Fitness)> = self
            .entries
            .iter()
            .filter(|(_, f)| *f == best_fitness)
            .collect();
        tied.choose(rng).map(|(s, f)| (s, f))
    }

    /// Uniform random choice among entries strictly worse than the best;
    /// falls back to a uniform choice over all entries when none are.
    pub fn random_non_best<R: Rng>(&self, rng: &mut R) -> Option<(&S, &Fitness)> {
        let best_fitness = self.best()?.1.clone();
        let worse: Vec<&(S, Fitness)> = self
            .entries
            .iter()
            .filter(|(_, f)| *f != best_fitness)
            .collect();
        if worse.is_empty() {
            let all: Vec<&(S, Fitness)> = self.entries.iter().collect();
            return all.choose(rng).map(|(s, f)| (s, f));
        }
        worse.choose(rng).map(|(s, f)| (s, f))
    }

    /// The `n` fittest entries, best first. Ties keep insertion order.
    pub fn top_n(&self, n: usize) -> Vec<(&S, &Fitness)> {
        let mut refs: Vec<&(S, Fitness)> = self.entries.iter().collect();
        refs.sort_by(|a, b| {
            let ord = a.1.total_cmp(&b.1);
            if self.sense.is_maximize() {
                ord.reverse()
            } else {
                ord
            }
        });
        refs.truncate(n);
        refs.into_iter().map(|(s, f)| (s, f)).collect()
    }

    /// Removes later entries whose projection under `key_fn` equals an
    /// earlier entry's projection. Returns the number removed.
    ///
    /// Only the raw log is trimmed; the best-set and bounds are untouched.
    pub fn dedup_by<K: PartialEq>(&mut self, key_fn: impl Fn(&S) -> K) -> usize {
        let mut kept: Vec<(S, Fitness)> = Vec::with_capacity(self.entries.len());
        let mut kept_keys: Vec<K> = Vec::new();
        let mut removed = 0;
        for (solution, fitness) in self.entries.drain(..) {
            let key = key_fn(&solution);
            if kept_keys.contains(&key) {
                removed += 1;
            } else {
                kept_keys.push(key);
                kept.push((solution, fitness));
            }
        }
        self.entries = kept;
        removed
    }

    /// Concatenates two archives' raw logs into a new archive.
    ///
    /// Bounding is *not* re-applied: every distinct fitness of both logs
    /// sits in the merged best-set until [`retruncate`] is called.
    ///
    /// [`retruncate`]: SolutionArchive::retruncate
    pub fn merge(self, other: Self) -> Self {
        let mut merged = Self::new(self.sense);
        merged.limit_store = self.limit_store;
        merged.keep_best = self.keep_best;
        merged.entries = self.entries;
        merged.entries.extend(other.entries);
        merged.rebuild();
        merged
    }

    /// Re-applies the best-set bound, keeping the `keep_best` fittest
    /// values, and recomputes the running bounds over what is retained.
    pub fn retruncate(&mut self) {
        if self.limit_store && self.heap.len() > self.keep_best {
            let mut values: Vec<Ranked> =
                self.heap.drain().map(|Reverse(ranked)| ranked).collect();
            // Best first; the tail beyond the capacity drops out.
            values.sort_by(|a, b| b.cmp(a));
            values.truncate(self.keep_best);
            self.heap = values.into_iter().map(Reverse).collect();
        }
        self.refresh_bounds();
        self.frozen_best = None;
    }

    /// Sorts the retained best-set — descending when maximizing, ascending
    /// otherwise — freezing it for reporting.
    pub fn finalize(&mut self) {
        let mut values: Vec<Fitness> = self
            .heap
            .iter()
            .map(|Reverse(ranked)| ranked.fitness.clone())
            .collect();
        values.sort();
        if self.sense.is_maximize() {
            values.reverse();
        }
        self.frozen_best = Some(values);
    }

    /// The retained best-set values: sorted after [`finalize`], unordered
    /// before.
    ///
    /// [`finalize`]: SolutionArchive::finalize
    pub fn retained_best(&self) -> Vec<Fitness> {
        match &self.frozen_best {
            Some(frozen) => frozen.clone(),
            None => self
                .heap
                .iter()
                .map(|Reverse(ranked)| ranked.fitness.clone())
                .collect(),
        }
    }

    /// Number of values currently retained in the best-set.
    pub fn retained_len(&self) -> usize {
        self.heap.len()
    }

    /// Raw log length (duplicates included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the raw log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(S, Fitness)] {
        &self.entries
    }

    /// The archive's objective direction.
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Smallest fitness ever considered for retention.
    pub fn running_min(&self) -> Option<&Fitness> {
        self.running_min.as_ref()
    }

    /// Largest fitness ever considered for retention.
    pub fn running_max(&self) -> Option<&Fitness> {
        self.running_max.as_ref()
    }

    /// Rebuilds dedup set, best-set, bounds, and incumbent from the raw
    /// log. The best-set is left unbounded; callers apply [`retruncate`].
    ///
    /// [`retruncate`]: SolutionArchive::retruncate
    fn rebuild(&mut self) {
        self.seen.clear();
        self.heap.clear();
        self.frozen_best = None;
        let maximize = self.sense.is_maximize();
        for (solution, fitness) in &self.entries {
            if self.seen.insert(solution.clone()) {
                self.heap.push(Reverse(Ranked {
                    fitness: fitness.clone(),
                    maximize,
                }));
            }
        }
        self.refresh_bounds();
        let mut best: Option<(S, Fitness)> = None;
        for (solution, fitness) in &self.entries {
            let replace = match &best {
                Some((_, current)) => self.sense.better(fitness, current),
                None => true,
            };
            if replace {
                best = Some((solution.clone(), fitness.clone()));
            }
        }
        self.best = best;
    }

    /// Recomputes the running bounds over the retained best-set.
    fn refresh_bounds(&mut self) {
        self.running_min = self
            .heap
            .iter()
            .map(|Reverse(ranked)| ranked.fitness.clone())
            .min();
        self.running_max = self
            .heap
            .iter()
            .map(|Reverse(ranked)| ranked.fitness.clone())
            .max();
    }
}
