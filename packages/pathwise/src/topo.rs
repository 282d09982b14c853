//! Topological ordering collaborator consumed by the DAG shortest-path
//! algorithm. Kahn's algorithm over the read-only graph capability;
//! deterministic because the zero-in-degree queue follows vertex enumeration
//! order.

use crate::error::{AlgorithmError, Result};
use crate::traits::{Edge, Graph};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Returns the vertices in an order where every edge goes from an earlier to
/// a later vertex, or `NotAcyclic` if the graph has a cycle.
pub fn topological_sort<G: Graph>(graph: &G) -> Result<Vec<G::Vertex>> {
    let mut in_degree: IndexMap<G::Vertex, usize> = graph
        .vertices()
        .map(|v| (v.clone(), 0))
        .collect();
    for edge in graph.edges() {
        if let Some(degree) = in_degree.get_mut(edge.target()) {
            *degree += 1;
        }
    }

    let mut ready: VecDeque<G::Vertex> = in_degree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(v, _)| v.clone())
        .collect();

    let mut order = Vec::with_capacity(graph.order());
    while let Some(vertex) = ready.pop_front() {
        for edge in graph.out_edges(&vertex) {
            if let Some(degree) = in_degree.get_mut(edge.target()) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(edge.target().clone());
                }
            }
        }
        order.push(vertex);
    }

    if order.len() != graph.order() {
        return Err(AlgorithmError::NotAcyclic);
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::AdjacencyGraph;

    #[test]
    fn orders_a_dag() {
        let graph =
            AdjacencyGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("a", "c", 1.0)])
                .unwrap();
        let order = topological_sort(&graph).unwrap();
        let position =
            |v: &str| order.iter().position(|o| *o == v).expect("vertex in order");
        assert!(position("a") < position("b"));
        assert!(position("b") < position("c"));
    }

    #[test]
    fn rejects_a_cycle() {
        let graph =
            AdjacencyGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)])
                .unwrap();
        assert_eq!(topological_sort(&graph).unwrap_err(), AlgorithmError::NotAcyclic);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = AdjacencyGraph::from_edges([("a", "a", 1.0)]).unwrap();
        assert_eq!(topological_sort(&graph).unwrap_err(), AlgorithmError::NotAcyclic);
    }
}
