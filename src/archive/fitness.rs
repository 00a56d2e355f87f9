//! Fitness values and objective direction.
//!
//! Fitness is either a single scalar or a fixed-length vector of scalars
//! ("tuple fitness"). One [`ObjectiveSense`], fixed at archive
//! construction, governs which direction is better for every comparison.
//!
//! Ranking (archives, top-K heaps) needs a *total* order: scalars compare
//! by `f64::total_cmp`, tuples lexicographically component-by-component.
//! That order is deliberately deterministic — NaN sorts per `total_cmp` —
//! so replays and property tests are reproducible. Pareto logic never uses
//! it: dominance is component-wise only.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of optimization, fixed per archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveSense {
    /// Larger fitness is better.
    Maximize,
    /// Smaller fitness is better.
    Minimize,
}

impl ObjectiveSense {
    /// Whether this sense maximizes.
    #[inline]
    pub fn is_maximize(self) -> bool {
        self == ObjectiveSense::Maximize
    }

    /// Whether `a` is strictly better than `b` under this sense.
    pub fn better(self, a: &Fitness, b: &Fitness) -> bool {
        match self {
            ObjectiveSense::Maximize => a.total_cmp(b) == Ordering::Greater,
            ObjectiveSense::Minimize => a.total_cmp(b) == Ordering::Less,
        }
    }

    /// Whether `a` is at least as good as `b` under this sense.
    pub fn at_least_as_good(self, a: &Fitness, b: &Fitness) -> bool {
        !self.better(b, a)
    }
}

/// A fixed-length vector of objective values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TupleFitness {
    values: Vec<f64>,
}

impl TupleFitness {
    /// Creates a tuple fitness.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of objective dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tuple has no dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The objective values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Deterministic lexicographic order (component-wise `total_cmp`,
    /// shorter tuples first on a shared prefix). Used for ranking only.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.values.iter().zip(&other.values) {
            let ord = a.total_cmp(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.values.len().cmp(&other.values.len())
    }

    /// Pareto dominance: at least as good as `other` in every component and
    /// strictly better in at least one, under `sense`.
    ///
    /// Tuples of different lengths never dominate each other; equal tuples
    /// do not dominate (fitness-equal points co-exist on a front).
    pub fn dominates(&self, other: &Self, sense: ObjectiveSense) -> bool {
        if self.values.len() != other.values.len() {
            return false;
        }
        let mut strictly_better = false;
        for (a, b) in self.values.iter().zip(&other.values) {
            let (better, worse) = if sense.is_maximize() {
                (a > b, a < b)
            } else {
                (a < b, a > b)
            };
            if worse {
                return false;
            }
            if better {
                strictly_better = true;
            }
        }
        strictly_better
    }
}

impl PartialEq for TupleFitness {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for TupleFitness {}

impl PartialOrd for TupleFitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Ord for TupleFitness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl From<Vec<f64>> for TupleFitness {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// A solution's evaluated quality: one scalar or one objective vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Fitness {
    /// Single totally-ordered objective.
    Scalar(f64),
    /// Vector of objectives for multi-objective runs.
    Tuple(TupleFitness),
}

impl Fitness {
    /// Creates a scalar fitness.
    pub fn scalar(value: f64) -> Self {
        Fitness::Scalar(value)
    }

    /// Creates a tuple fitness.
    pub fn tuple(values: Vec<f64>) -> Self {
        Fitness::Tuple(TupleFitness::new(values))
    }

    /// The scalar value, if this is a scalar fitness.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Fitness::Scalar(v) => Some(*v),
            Fitness::Tuple(_) => None,
        }
    }

    /// The tuple value, if this is a tuple fitness.
    pub fn as_tuple(&self) -> Option<&TupleFitness> {
        match self {
            Fitness::Tuple(t) => Some(t),
            Fitness::Scalar(_) => None,
        }
    }

    /// Deterministic total order for ranking.
    ///
    /// Archives hold one fitness shape; across shapes the variant tag keeps
    /// the order total (scalars sort before tuples).
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Fitness::Scalar(a), Fitness::Scalar(b)) => a.total_cmp(b),
            (Fitness::Tuple(a), Fitness::Tuple(b)) => a.total_cmp(b),
            (Fitness::Scalar(_), Fitness::Tuple(_)) => Ordering::Less,
            (Fitness::Tuple(_), Fitness::Scalar(_)) => Ordering::Greater,
        }
    }
}

impl PartialEq for Fitness {
    fn eq(&self, other: &Self) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }
}

impl Eq for Fitness {}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.total_cmp(other))
    }
}

impl Ord for Fitness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl From<f64> for Fitness {
    fn from(value: f64) -> Self {
        Fitness::Scalar(value)
    }
}

impl From<Vec<f64>> for Fitness {
    fn from(values: Vec<f64>) -> Self {
        Fitness::tuple(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_total_order() {
        let a = Fitness::scalar(1.0);
        let b = Fitness::scalar(2.0);
        assert!(a < b);
        assert_eq!(a, Fitness::scalar(1.0));
        assert_eq!(a.total_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_tuple_lexicographic_order() {
        let a = TupleFitness::new(vec![1.0, 5.0]);
        let b = TupleFitness::new(vec![1.0, 6.0]);
        let c = TupleFitness::new(vec![2.0, 0.0]);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, TupleFitness::new(vec![1.0, 5.0]));
    }

    #[test]
    fn test_sense_direction() {
        let lo = Fitness::scalar(1.0);
        let hi = Fitness::scalar(3.0);
        assert!(ObjectiveSense::Maximize.better(&hi, &lo));
        assert!(!ObjectiveSense::Maximize.better(&lo, &hi));
        assert!(ObjectiveSense::Minimize.better(&lo, &hi));
        assert!(ObjectiveSense::Maximize.at_least_as_good(&hi, &hi));
        assert!(ObjectiveSense::Minimize.at_least_as_good(&lo, &hi));
    }

    #[test]
    fn test_dominance_maximize() {
        let sense = ObjectiveSense::Maximize;
        let p31 = TupleFitness::new(vec![3.0, 1.0]);
        let p13 = TupleFitness::new(vec![1.0, 3.0]);
        let p22 = TupleFitness::new(vec![2.0, 2.0]);
        let p11 = TupleFitness::new(vec![1.0, 1.0]);

        // (1,1) is dominated by all three others.
        assert!(p31.dominates(&p11, sense));
        assert!(p13.dominates(&p11, sense));
        assert!(p22.dominates(&p11, sense));

        // The three are mutually non-dominating.
        assert!(!p31.dominates(&p13, sense));
        assert!(!p13.dominates(&p31, sense));
        assert!(!p22.dominates(&p31, sense));
        assert!(!p31.dominates(&p22, sense));
    }

    #[test]
    fn test_dominance_minimize() {
        let sense = ObjectiveSense::Minimize;
        let small = TupleFitness::new(vec![1.0, 1.0]);
        let big = TupleFitness::new(vec![2.0, 3.0]);
        assert!(small.dominates(&big, sense));
        assert!(!big.dominates(&small, sense));
    }

    #[test]
    fn test_equal_tuples_do_not_dominate() {
        let sense = ObjectiveSense::Maximize;
        let a = TupleFitness::new(vec![2.0, 2.0]);
        let b = TupleFitness::new(vec![2.0, 2.0]);
        assert!(!a.dominates(&b, sense));
        assert!(!b.dominates(&a, sense));
    }

    #[test]
    fn test_length_mismatch_never_dominates() {
        let sense = ObjectiveSense::Maximize;
        let a = TupleFitness::new(vec![5.0, 5.0]);
        let b = TupleFitness::new(vec![1.0]);
        assert!(!a.dominates(&b, sense));
    }

    #[test]
    fn test_variant_tag_keeps_order_total() {
        let s = Fitness::scalar(100.0);
        let t = Fitness::tuple(vec![0.0]);
        assert!(s < t);
    }

    #[test]
    fn test_fitness_serde_roundtrip() {
        let f = Fitness::tuple(vec![1.5, -2.0]);
        let json = serde_json::to_string(&f).unwrap();
        let back: Fitness = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
