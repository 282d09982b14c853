//! External recorders that harvest algorithm notifications.
//!
//! Recorders never hold references into an algorithm's internal maps: they
//! subscribe to [`SearchEvents`], copy what they need out of each payload,
//! and build their own derived structures. `attach` returns a scoped guard;
//! dropping it always detaches, including on early exit from cancellation or
//! error.

use crate::events::{SearchEvents, Subscription, TreeEdge};
use crate::traits::Edge;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// Scoped attachment of a recorder to one algorithm's events.
pub struct ObserverAttachment<E> {
    _subscription: Subscription<TreeEdge<E>>,
}

/// Records, per vertex, the last edge that improved its distance. Walking the
/// map backward from a vertex reconstructs the tree path from the root.
pub struct PredecessorRecorder<V, E> {
    edges: Rc<RefCell<IndexMap<V, E>>>,
}

impl<V, E> Default for PredecessorRecorder<V, E>
where
    V: Debug + Clone + Eq + Hash + 'static,
    E: Edge<Vertex = V> + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> PredecessorRecorder<V, E>
where
    V: Debug + Clone + Eq + Hash + 'static,
    E: Edge<Vertex = V> + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            edges: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    pub fn attach(&self, events: &SearchEvents<V, E>) -> ObserverAttachment<E> {
        let edges = Rc::clone(&self.edges);
        let subscription = events.tree_edge.subscribe(move |tree: &TreeEdge<E>| {
            edges
                .borrow_mut()
                .insert(tree.edge.target().clone(), tree.edge.clone());
        });
        ObserverAttachment {
            _subscription: subscription,
        }
    }

    /// The recorded predecessor edge of `vertex`, if any relaxation improved
    /// it during the observed run.
    pub fn edge_to(&self, vertex: &V) -> Option<E> {
        self.edges.borrow().get(vertex).cloned()
    }

    /// Reconstructs the root-to-`target` edge sequence by walking backward.
    /// `None` if `target` was never reached.
    pub fn path_to(&self, target: &V) -> Option<Vec<E>> {
        let edges = self.edges.borrow();
        let mut path = Vec::new();
        let mut current = target.clone();
        // a tree walk visits each recorded edge at most once
        for _ in 0..=edges.len() {
            match edges.get(&current) {
                Some(edge) => {
                    path.push(edge.clone());
                    current = edge.source().clone();
                }
                None => {
                    if path.is_empty() {
                        return None;
                    }
                    path.reverse();
                    return Some(path);
                }
            }
        }
        // cycle in the recorded edges; not a tree, refuse to answer
        None
    }

    pub fn predecessors(&self) -> IndexMap<V, E> {
        self.edges.borrow().clone()
    }

    pub fn clear(&self) {
        self.edges.borrow_mut().clear();
    }
}

/// Logs every distance improvement in the order it happened.
pub struct DistanceRecorder<V> {
    log: Rc<RefCell<Vec<(V, f64)>>>,
}

impl<V> Default for DistanceRecorder<V>
where
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DistanceRecorder<V>
where
    V: Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn attach<E>(&self, events: &SearchEvents<V, E>) -> ObserverAttachment<E>
    where
        E: Edge<Vertex = V> + Clone + 'static,
    {
        let log = Rc::clone(&self.log);
        let subscription = events.tree_edge.subscribe(move |tree: &TreeEdge<E>| {
            log.borrow_mut()
                .push((tree.edge.target().clone(), tree.distance));
        });
        ObserverAttachment {
            _subscription: subscription,
        }
    }

    pub fn log(&self) -> Vec<(V, f64)> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::WeightedEdge;

    fn tree(edge: WeightedEdge<&'static str>, distance: f64) -> TreeEdge<WeightedEdge<&'static str>> {
        TreeEdge { edge, distance }
    }

    #[test]
    fn predecessor_recorder_keeps_the_last_improving_edge() {
        let events: SearchEvents<&str, WeightedEdge<&str>> = SearchEvents::new();
        let recorder = PredecessorRecorder::new();
        let _attachment = recorder.attach(&events);

        events.tree_edge.emit(&tree(WeightedEdge::new("a", "b", 9.0), 9.0));
        events.tree_edge.emit(&tree(WeightedEdge::new("c", "b", 4.0), 4.0));

        let edge = recorder.edge_to(&"b").expect("b has a predecessor");
        assert_eq!(*edge.source(), "c");
    }

    #[test]
    fn path_to_walks_back_to_the_root() {
        let events: SearchEvents<&str, WeightedEdge<&str>> = SearchEvents::new();
        let recorder = PredecessorRecorder::new();
        let _attachment = recorder.attach(&events);

        events.tree_edge.emit(&tree(WeightedEdge::new("a", "b", 1.0), 1.0));
        events.tree_edge.emit(&tree(WeightedEdge::new("b", "c", 2.0), 3.0));

        let path = recorder.path_to(&"c").expect("c is reachable");
        assert_eq!(path.len(), 2);
        assert_eq!(*path[0].source(), "a");
        assert_eq!(*path[1].target(), "c");

        assert!(recorder.path_to(&"a").is_none());
        assert!(recorder.path_to(&"zzz").is_none());
    }

    #[test]
    fn detaching_stops_recording() {
        let events: SearchEvents<&str, WeightedEdge<&str>> = SearchEvents::new();
        let recorder = PredecessorRecorder::new();
        let attachment = recorder.attach(&events);

        events.tree_edge.emit(&tree(WeightedEdge::new("a", "b", 1.0), 1.0));
        drop(attachment);
        events.tree_edge.emit(&tree(WeightedEdge::new("a", "c", 1.0), 1.0));

        assert!(recorder.edge_to(&"b").is_some());
        assert!(recorder.edge_to(&"c").is_none());
    }

    #[test]
    fn distance_recorder_logs_in_order() {
        let events: SearchEvents<&str, WeightedEdge<&str>> = SearchEvents::new();
        let recorder = DistanceRecorder::new();
        let _attachment = recorder.attach(&events);

        events.tree_edge.emit(&tree(WeightedEdge::new("a", "b", 2.0), 2.0));
        events.tree_edge.emit(&tree(WeightedEdge::new("b", "c", 1.0), 3.0));

        assert_eq!(recorder.log(), vec![("b", 2.0), ("c", 3.0)]);
    }
}
