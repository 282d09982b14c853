//! Shared bookkeeping for the single-source algorithms: distance map, color
//! map, and the `relax` operator. The relaxer is the only place min-vs-max
//! semantics live; everything here is reused unchanged by Dijkstra, A*,
//! Bellman-Ford, and the DAG pass.

use crate::core::VertexColor;
use crate::error::AlgorithmError;
use crate::relaxer::DistanceRelaxer;
use crate::traits::Edge;
use indexmap::IndexMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

pub struct ShortestPathState<V, R> {
    relaxer: R,
    distances: IndexMap<V, f64>,
    colors: IndexMap<V, VertexColor>,
}

impl<V, R> ShortestPathState<V, R>
where
    V: Debug + Clone + Eq + Hash,
    R: DistanceRelaxer,
{
    pub(crate) fn new(relaxer: R) -> Self {
        Self {
            relaxer,
            distances: IndexMap::new(),
            colors: IndexMap::new(),
        }
    }

    pub(crate) fn relaxer(&self) -> R
    where
        R: Copy,
    {
        self.relaxer
    }

    /// Allocates fresh maps: every vertex starts at the relaxer's initial
    /// distance, colored White.
    pub(crate) fn initialize<'a>(&mut self, vertices: impl Iterator<Item = &'a V>)
    where
        V: 'a,
    {
        self.distances.clear();
        self.colors.clear();
        for vertex in vertices {
            self.distances
                .insert(vertex.clone(), self.relaxer.initial_distance());
            self.colors.insert(vertex.clone(), VertexColor::White);
        }
    }

    /// Attempts to improve the target's distance through `edge`. Returns the
    /// improved distance, or `None` if the candidate did not beat it.
    pub(crate) fn relax<E>(&mut self, edge: &E, weight: f64) -> Option<f64>
    where
        E: Edge<Vertex = V> + Debug,
    {
        let du = self.distance_or_initial(edge.source());
        let dv = self.distance_or_initial(edge.target());
        let candidate = self.relaxer.combine(du, weight);
        if self.relaxer.improves(candidate, dv) {
            trace!(edge = ?edge, distance = candidate, "relaxed");
            self.distances.insert(edge.target().clone(), candidate);
            Some(candidate)
        } else {
            None
        }
    }

    /// Like [`relax`](Self::relax) but without mutating: used by the
    /// Bellman-Ford negative-cycle scan.
    pub(crate) fn would_relax<E>(&self, edge: &E, weight: f64) -> bool
    where
        E: Edge<Vertex = V>,
    {
        let du = self.distance_or_initial(edge.source());
        let dv = self.distance_or_initial(edge.target());
        self.relaxer.improves(self.relaxer.combine(du, weight), dv)
    }

    fn distance_or_initial(&self, vertex: &V) -> f64 {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or_else(|| self.relaxer.initial_distance())
    }

    pub(crate) fn set_distance(&mut self, vertex: V, distance: f64) {
        self.distances.insert(vertex, distance);
    }

    pub(crate) fn set_color(&mut self, vertex: V, color: VertexColor) {
        self.colors.insert(vertex, color);
    }

    pub(crate) fn try_get_distance(&self, vertex: &V) -> Option<f64> {
        self.distances.get(vertex).copied()
    }

    pub(crate) fn color(&self, vertex: &V) -> Option<VertexColor> {
        self.colors.get(vertex).copied()
    }

    pub(crate) fn distances(&self) -> impl Iterator<Item = (&V, f64)> {
        self.distances.iter().map(|(v, &d)| (v, d))
    }
}

/// Weight functions must stay inside the relaxer's total order; NaN would
/// poison every later comparison, so it is rejected at the evaluation site.
pub(crate) fn ensure_weight<E: Debug>(
    weight: f64,
    edge: &E,
) -> std::result::Result<f64, AlgorithmError> {
    if weight.is_nan() {
        return Err(AlgorithmError::InvalidArgument {
            reason: format!("weight function returned NaN for edge {edge:?}"),
        });
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relaxer::{CriticalDistanceRelaxer, ShortestDistanceRelaxer};
    use crate::storage::WeightedEdge;

    #[test]
    fn relax_improves_from_initial_distance() {
        let mut state = ShortestPathState::new(ShortestDistanceRelaxer);
        state.initialize(["a", "b"].iter());
        state.set_distance("a", 0.0);

        let edge = WeightedEdge::new("a", "b", 3.0);
        assert_eq!(state.relax(&edge, 3.0), Some(3.0));
        assert_eq!(state.relax(&edge, 3.0), None);
        assert_eq!(state.try_get_distance(&"b"), Some(3.0));
    }

    #[test]
    fn relax_through_unreached_source_is_a_no_op() {
        let mut state = ShortestPathState::new(ShortestDistanceRelaxer);
        state.initialize(["a", "b"].iter());

        // dist[a] is +inf, so the candidate is +inf and never improves
        let edge = WeightedEdge::new("a", "b", 1.0);
        assert_eq!(state.relax(&edge, 1.0), None);
    }

    #[test]
    fn critical_relaxer_keeps_the_larger_distance() {
        let mut state = ShortestPathState::new(CriticalDistanceRelaxer);
        state.initialize(["a", "b"].iter());
        state.set_distance("a", 0.0);

        let short = WeightedEdge::new("a", "b", 2.0);
        let long = WeightedEdge::new("a", "b", 5.0);
        assert_eq!(state.relax(&short, 2.0), Some(2.0));
        assert_eq!(state.relax(&long, 5.0), Some(5.0));
        assert_eq!(state.relax(&short, 2.0), None);
    }

    #[test]
    fn initialize_resets_between_runs() {
        let mut state = ShortestPathState::new(ShortestDistanceRelaxer);
        state.initialize(["a"].iter());
        state.set_distance("a", 1.0);
        state.set_color("a", VertexColor::Black);

        state.initialize(["a"].iter());
        assert_eq!(state.try_get_distance(&"a"), Some(f64::INFINITY));
        assert_eq!(state.color(&"a"), Some(VertexColor::White));
    }
}
