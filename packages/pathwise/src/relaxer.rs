//! Distance relaxers: the pluggable algebra behind `relax`.
//!
//! A relaxer is the only place that encodes min-vs-max semantics. Swapping
//! [`ShortestDistanceRelaxer`] for [`CriticalDistanceRelaxer`] turns a
//! relaxation pass from shortest-path into longest/critical-path computation
//! without touching the traversal code.

use std::cmp::Ordering;

/// Strategy defining the initial distance, the combine operator
/// (distance ⊕ weight), and a total order over distances.
pub trait DistanceRelaxer {
    fn initial_distance(&self) -> f64;
    fn combine(&self, distance: f64, weight: f64) -> f64;
    fn compare(&self, a: f64, b: f64) -> Ordering;

    /// `candidate` beats `current` under this relaxer's order.
    fn improves(&self, candidate: f64, current: f64) -> bool {
        self.compare(candidate, current) == Ordering::Less
    }
}

/// Minimizing relaxer: `initial = +inf`, `combine = d + w`, ascending order.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShortestDistanceRelaxer;

impl DistanceRelaxer for ShortestDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }
}

/// Maximizing relaxer for longest/critical-path computation:
/// `initial = -inf`, `combine = d + w`, descending order.
#[derive(Copy, Clone, Debug, Default)]
pub struct CriticalDistanceRelaxer;

impl DistanceRelaxer for CriticalDistanceRelaxer {
    fn initial_distance(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn combine(&self, distance: f64, weight: f64) -> f64 {
        distance + weight
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        b.total_cmp(&a)
    }
}

/// Hop-count relaxer for unweighted distance: ignores the edge weight and
/// charges one per edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeCountRelaxer;

impl DistanceRelaxer for EdgeCountRelaxer {
    fn initial_distance(&self) -> f64 {
        0.0
    }

    fn combine(&self, distance: f64, _weight: f64) -> f64 {
        distance + 1.0
    }

    fn compare(&self, a: f64, b: f64) -> Ordering {
        a.total_cmp(&b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn shortest_relaxation_never_decreases_for_non_negative_weights() {
        let relaxer = ShortestDistanceRelaxer;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let d: f64 = rng.gen_range(0.0..1e6);
            let w: f64 = rng.gen_range(0.0..1e3);
            let combined = relaxer.combine(d, w);
            assert_ne!(relaxer.compare(combined, d), Ordering::Less);
        }
    }

    #[test]
    fn shortest_orders_ascending_from_infinity() {
        let relaxer = ShortestDistanceRelaxer;
        assert!(relaxer.improves(1.0, relaxer.initial_distance()));
        assert!(relaxer.improves(1.0, 2.0));
        assert!(!relaxer.improves(2.0, 1.0));
        assert!(!relaxer.improves(1.0, 1.0));
    }

    #[test]
    fn critical_orders_descending_from_negative_infinity() {
        let relaxer = CriticalDistanceRelaxer;
        assert!(relaxer.improves(1.0, relaxer.initial_distance()));
        assert!(relaxer.improves(2.0, 1.0));
        assert!(!relaxer.improves(1.0, 2.0));
    }

    #[test]
    fn edge_count_charges_one_per_hop() {
        let relaxer = EdgeCountRelaxer;
        assert_eq!(relaxer.combine(3.0, 42.0), 4.0);
        assert_eq!(relaxer.initial_distance(), 0.0);
    }
}
