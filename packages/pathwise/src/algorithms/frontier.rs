//! Priority frontier and the traversal skeleton shared by Dijkstra and A*.
//!
//! The frontier is an index-tracking binary heap: a vertex-to-slot map makes
//! decrease-key an `O(log V)` reposition instead of a remove-and-reinsert.
//! The traversal is a breadth-first skeleton where the FIFO queue is replaced
//! by the frontier ordered by a caller-supplied priority key: current
//! distance for Dijkstra, distance plus heuristic for A*.

use crate::core::VertexColor;
use crate::error::AlgorithmError;
use crate::events::{SearchEvents, TreeEdge};
use crate::lifecycle::{CancellationToken, Interruptible};
use crate::relaxer::DistanceRelaxer;
use crate::traits::{Edge, Graph};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use super::state::{ShortestPathState, ensure_weight};

/// Min-oriented (per comparator) mutable priority structure over vertices.
pub(crate) struct PriorityFrontier<V, C> {
    heap: Vec<(V, f64)>,
    slots: HashMap<V, usize>,
    compare: C,
}

impl<V, C> PriorityFrontier<V, C>
where
    V: Clone + Eq + Hash,
    C: Fn(f64, f64) -> Ordering,
{
    pub(crate) fn with_comparator(compare: C) -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            compare,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub(crate) fn push(&mut self, vertex: V, priority: f64) {
        let index = self.heap.len();
        self.slots.insert(vertex.clone(), index);
        self.heap.push((vertex, priority));
        self.sift_up(index);
    }

    pub(crate) fn pop(&mut self) -> Option<(V, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let (vertex, priority) = self.heap.pop()?;
        self.slots.remove(&vertex);
        if !self.heap.is_empty() {
            self.slots.insert(self.heap[0].0.clone(), 0);
            self.sift_down(0);
        }
        Some((vertex, priority))
    }

    /// Repositions an already-queued vertex under its new priority; falls
    /// back to an insert if the vertex is not queued.
    pub(crate) fn update(&mut self, vertex: &V, priority: f64) {
        match self.slots.get(vertex).copied() {
            Some(index) => {
                self.heap[index].1 = priority;
                self.sift_up(index);
                self.sift_down(index);
            }
            None => self.push(vertex.clone(), priority),
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(self.heap[a].1, self.heap[b].1) == Ordering::Less
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].0.clone(), a);
        self.slots.insert(self.heap[b].0.clone(), b);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.less(index, parent) {
                self.swap_entries(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let mut smallest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < self.heap.len() && self.less(child, smallest) {
                    smallest = child;
                }
            }
            if smallest == index {
                break;
            }
            self.swap_entries(index, smallest);
            index = smallest;
        }
    }
}

/// One rooted pass of the shared Dijkstra/A* traversal.
///
/// Negative weights are checked per edge examined, not up front; the first
/// one fails the whole computation. When `stop_at` is set the traversal
/// returns as soon as that vertex is finished.
#[allow(clippy::too_many_arguments)]
pub(crate) fn frontier_search<G, WF, R, PF>(
    graph: &G,
    weight: &WF,
    state: &mut ShortestPathState<G::Vertex, R>,
    events: &SearchEvents<G::Vertex, G::Edge>,
    token: &CancellationToken,
    root: &G::Vertex,
    priority: &PF,
    stop_at: Option<&G::Vertex>,
) -> Interruptible<()>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer + Copy,
    PF: Fn(&G::Vertex, f64) -> f64,
{
    let relaxer = state.relaxer();
    let mut frontier = PriorityFrontier::with_comparator(move |a, b| relaxer.compare(a, b));

    state.set_distance(root.clone(), 0.0);
    state.set_color(root.clone(), VertexColor::Gray);
    events.discover_vertex.emit(root);
    frontier.push(root.clone(), priority(root, 0.0));

    while let Some((vertex, _)) = frontier.pop() {
        token.check()?;
        events.examine_vertex.emit(&vertex);

        for edge in graph.out_edges(&vertex) {
            events.examine_edge.emit(edge);
            let w = ensure_weight(weight(edge), edge)?;
            if w < 0.0 {
                return Err(AlgorithmError::negative_weight(edge, w).into());
            }

            let successor = edge.target().clone();
            match state.color(&successor) {
                Some(VertexColor::White) | None => match state.relax(edge, w) {
                    Some(distance) => {
                        state.set_color(successor.clone(), VertexColor::Gray);
                        events.discover_vertex.emit(&successor);
                        events.tree_edge.emit(&TreeEdge {
                            edge: edge.clone(),
                            distance,
                        });
                        frontier.push(successor.clone(), priority(&successor, distance));
                    }
                    None => events.edge_not_relaxed.emit(edge),
                },
                Some(VertexColor::Gray) => match state.relax(edge, w) {
                    Some(distance) => {
                        frontier.update(&successor, priority(&successor, distance));
                        events.tree_edge.emit(&TreeEdge {
                            edge: edge.clone(),
                            distance,
                        });
                    }
                    None => events.edge_not_relaxed.emit(edge),
                },
                // Settled vertices cannot improve: weights are non-negative.
                Some(VertexColor::Black) => events.edge_not_relaxed.emit(edge),
            }
        }

        state.set_color(vertex.clone(), VertexColor::Black);
        events.finish_vertex.emit(&vertex);
        if stop_at == Some(&vertex) {
            return Ok(());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending() -> impl Fn(f64, f64) -> Ordering {
        |a: f64, b: f64| a.total_cmp(&b)
    }

    #[test]
    fn pops_in_priority_order() {
        let mut frontier = PriorityFrontier::with_comparator(ascending());
        frontier.push("c", 3.0);
        frontier.push("a", 1.0);
        frontier.push("b", 2.0);

        assert_eq!(frontier.pop(), Some(("a", 1.0)));
        assert_eq!(frontier.pop(), Some(("b", 2.0)));
        assert_eq!(frontier.pop(), Some(("c", 3.0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn decrease_key_repositions_without_duplicating() {
        let mut frontier = PriorityFrontier::with_comparator(ascending());
        frontier.push("a", 10.0);
        frontier.push("b", 5.0);
        frontier.push("c", 7.0);

        frontier.update(&"a", 1.0);
        assert_eq!(frontier.pop(), Some(("a", 1.0)));
        assert_eq!(frontier.pop(), Some(("b", 5.0)));
        assert_eq!(frontier.pop(), Some(("c", 7.0)));
        assert!(frontier.is_empty());
    }

    #[test]
    fn update_can_also_demote() {
        let mut frontier = PriorityFrontier::with_comparator(ascending());
        frontier.push("a", 1.0);
        frontier.push("b", 2.0);

        frontier.update(&"a", 9.0);
        assert_eq!(frontier.pop(), Some(("b", 2.0)));
        assert_eq!(frontier.pop(), Some(("a", 9.0)));
    }

    #[test]
    fn descending_comparator_makes_a_max_frontier() {
        let mut frontier = PriorityFrontier::with_comparator(|a: f64, b: f64| b.total_cmp(&a));
        frontier.push("small", 1.0);
        frontier.push("big", 10.0);
        assert_eq!(frontier.pop(), Some(("big", 10.0)));
    }

    #[test]
    fn many_vertices_stay_heap_ordered() {
        let mut frontier = PriorityFrontier::with_comparator(ascending());
        for i in 0..100u32 {
            frontier.push(i, f64::from((i * 37) % 100));
        }
        let mut previous = f64::NEG_INFINITY;
        while let Some((_, priority)) = frontier.pop() {
            assert!(priority >= previous);
            previous = priority;
        }
    }
}
