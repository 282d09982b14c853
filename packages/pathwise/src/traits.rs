//! Capability traits the engine reads graphs through.
//!
//! The engine never mutates a graph; concrete containers only have to expose
//! enumeration and out-edge lookup. Weight functions are plain closures
//! (`Fn(&Edge) -> f64`) supplied per algorithm, evaluated possibly many times
//! per edge, so they must be cheap and side-effect-free.

use std::fmt::Debug;
use std::hash::Hash;

/// A directed edge between two caller-defined vertices.
pub trait Edge {
    type Vertex;

    fn source(&self) -> &Self::Vertex;
    fn target(&self) -> &Self::Vertex;
}

/// Minimal read-only graph trait consumed by every algorithm.
///
/// Vertex identity is value equality; vertices are cloned into the
/// algorithm's bookkeeping maps, so keys should be cheap to clone.
pub trait Graph {
    type Vertex: Debug + Clone + Eq + Hash;
    type Edge: Edge<Vertex = Self::Vertex> + Debug + Clone;

    /// Number of vertices.
    fn order(&self) -> usize;
    /// Number of edges.
    fn size(&self) -> usize;

    fn vertices(&self) -> Box<dyn Iterator<Item = &Self::Vertex> + '_>;
    fn edges(&self) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;
    fn out_edges(&self, v: &Self::Vertex) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;

    fn contains_vertex(&self, v: &Self::Vertex) -> bool;
}
