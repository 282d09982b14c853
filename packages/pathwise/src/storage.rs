//! AdjacencyGraph: out-edges-only directed storage, implements Graph.
//!
//! Vertices are interned by value; edges are stored once in insertion order
//! with per-vertex out-edge indices. Parallel edges and self-loops are
//! permitted (Floyd-Warshall collapses parallels itself, the single-source
//! algorithms simply relax each one).

use crate::error::{AlgorithmError, Result};
use crate::traits::{Edge, Graph};
use indexmap::{IndexMap, IndexSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Owned weighted edge used by [`AdjacencyGraph`].
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedEdge<V> {
    source: V,
    target: V,
    pub weight: f64,
}

impl<V> WeightedEdge<V> {
    pub fn new(source: V, target: V, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl<V> Edge for WeightedEdge<V> {
    type Vertex = V;

    fn source(&self) -> &V {
        &self.source
    }
    fn target(&self) -> &V {
        &self.target
    }
}

#[derive(Clone, Default)]
pub struct AdjacencyGraph<V>
where
    V: Debug + Clone + Eq + Hash,
{
    vertices: IndexSet<V>,
    edges: Vec<WeightedEdge<V>>,
    out_adj: IndexMap<V, Vec<usize>>,
}

impl<V> AdjacencyGraph<V>
where
    V: Debug + Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            vertices: IndexSet::new(),
            edges: Vec::new(),
            out_adj: IndexMap::new(),
        }
    }

    pub fn from_edges<I>(edges_iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, f64)>,
    {
        let mut graph = Self::new();
        for (source, target, weight) in edges_iter {
            graph.add_edge(source, target, weight)?;
        }
        Ok(graph)
    }

    /// Interns the vertex if unseen; re-adding an existing vertex is a no-op.
    pub fn add_vertex(&mut self, v: V) {
        self.vertices.insert(v);
    }

    /// Adds a directed edge, interning both endpoints. NaN weights are
    /// rejected up front so the relaxation order stays total.
    pub fn add_edge(&mut self, source: V, target: V, weight: f64) -> Result<()> {
        if weight.is_nan() {
            return Err(AlgorithmError::InvalidArgument {
                reason: format!("edge {source:?} -> {target:?} has NaN weight"),
            });
        }
        self.vertices.insert(source.clone());
        self.vertices.insert(target.clone());
        let index = self.edges.len();
        self.edges
            .push(WeightedEdge::new(source.clone(), target, weight));
        self.out_adj.entry(source).or_default().push(index);
        Ok(())
    }
}

impl<V> Graph for AdjacencyGraph<V>
where
    V: Debug + Clone + Eq + Hash,
{
    type Vertex = V;
    type Edge = WeightedEdge<V>;

    fn order(&self) -> usize {
        self.vertices.len()
    }
    fn size(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.vertices.iter())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &WeightedEdge<V>> + '_> {
        Box::new(self.edges.iter())
    }

    fn out_edges(&self, v: &V) -> Box<dyn Iterator<Item = &WeightedEdge<V>> + '_> {
        match self.out_adj.get(v) {
            Some(indices) => Box::new(indices.iter().map(|&i| &self.edges[i])),
            None => Box::new(std::iter::empty()),
        }
    }

    fn contains_vertex(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }
}
