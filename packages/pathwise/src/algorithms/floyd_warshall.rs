//! Floyd-Warshall all-pairs shortest paths with path reconstruction and
//! negative-cycle detection.
//!
//! Independent data model: a table keyed by ordered vertex pairs. Each entry
//! holds a distance and a witness, either the direct edge realizing it or an
//! intermediate vertex `k` splitting the pair into `(i,k)` and `(k,j)`. Only
//! realized pairs are iterated, so dense graphs approach `O(V^3)` while
//! sparse ones stay cheaper.

use crate::error::{AlgorithmError, Result};
use crate::lifecycle::{AbortHandle, CancellationToken, Interrupt, Interruptible, Lifecycle};
use crate::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use crate::traits::{Edge, Graph};
use indexmap::IndexMap;
use tracing::debug;

use super::state::ensure_weight;

enum PathWitness<V, E> {
    /// A single edge realizes this pair.
    Direct(E),
    /// The pair splits at an intermediate vertex.
    Through(V),
}

struct PathEntry<V, E> {
    distance: f64,
    /// `None` only for the zero-length diagonal seeds.
    witness: Option<PathWitness<V, E>>,
}

pub struct FloydWarshall<'g, G, WF, R = ShortestDistanceRelaxer>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    graph: &'g G,
    weight: WF,
    relaxer: R,
    table: IndexMap<(G::Vertex, G::Vertex), PathEntry<G::Vertex, G::Edge>>,
    pub lifecycle: Lifecycle,
}

impl<'g, G, WF> FloydWarshall<'g, G, WF>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weight: WF) -> Self {
        Self::with_relaxer(graph, weight, ShortestDistanceRelaxer)
    }
}

impl<'g, G, WF, R> FloydWarshall<'g, G, WF, R>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer,
{
    pub fn with_relaxer(graph: &'g G, weight: WF, relaxer: R) -> Self {
        Self {
            graph,
            weight,
            relaxer,
            table: IndexMap::new(),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn compute(&mut self) -> Result<()> {
        self.lifecycle.begin()?;
        debug!(
            vertices = self.graph.order(),
            edges = self.graph.size(),
            "floyd-warshall: computing"
        );
        let token = self.lifecycle.token();
        let outcome = self
            .initialize()
            .map_err(Interrupt::from)
            .and_then(|()| self.run(&token));
        self.clean();
        self.lifecycle.settle(outcome)
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.lifecycle.abort_handle()
    }

    /// Seeds the diagonal with zero-length paths, then every edge, keeping
    /// the best weight among parallels together with the realizing edge.
    fn initialize(&mut self) -> Result<()> {
        self.table.clear();
        for vertex in self.graph.vertices() {
            self.table.insert(
                (vertex.clone(), vertex.clone()),
                PathEntry {
                    distance: 0.0,
                    witness: None,
                },
            );
        }
        for edge in self.graph.edges() {
            let w = ensure_weight((self.weight)(edge), edge)?;
            let key = (edge.source().clone(), edge.target().clone());
            let better = match self.table.get(&key) {
                Some(entry) => self.relaxer.improves(w, entry.distance),
                None => true,
            };
            if better {
                self.table.insert(
                    key,
                    PathEntry {
                        distance: w,
                        witness: Some(PathWitness::Direct(edge.clone())),
                    },
                );
            }
        }
        Ok(())
    }

    fn run(&mut self, token: &CancellationToken) -> Interruptible<()> {
        let vertices: Vec<G::Vertex> = self.graph.vertices().cloned().collect();

        for k in &vertices {
            token.check()?;
            let into_k: Vec<(G::Vertex, f64)> = self
                .table
                .iter()
                .filter(|((_, t), _)| t == k)
                .map(|((s, _), entry)| (s.clone(), entry.distance))
                .collect();
            let from_k: Vec<(G::Vertex, f64)> = self
                .table
                .iter()
                .filter(|((s, _), _)| s == k)
                .map(|((_, t), entry)| (t.clone(), entry.distance))
                .collect();

            for (i, dik) in &into_k {
                for (j, dkj) in &from_k {
                    let candidate = self.relaxer.combine(*dik, *dkj);
                    let key = (i.clone(), j.clone());
                    let better = match self.table.get(&key) {
                        Some(entry) => self.relaxer.improves(candidate, entry.distance),
                        None => true,
                    };
                    if better {
                        self.table.insert(
                            key,
                            PathEntry {
                                distance: candidate,
                                witness: Some(PathWitness::Through(k.clone())),
                            },
                        );
                    }
                }
            }
        }

        // A pair (v, v) beating the zero-length path means a cycle through v
        // that the relaxer considers an improvement.
        for vertex in &vertices {
            if let Some(entry) = self.table.get(&(vertex.clone(), vertex.clone()))
                && self.relaxer.improves(entry.distance, 0.0)
            {
                return Err(Interrupt::Failed(AlgorithmError::NegativeCycle {
                    vertex: format!("{vertex:?}"),
                }));
            }
        }
        Ok(())
    }

    fn clean(&mut self) {}

    pub fn try_get_distance(&self, source: &G::Vertex, target: &G::Vertex) -> Option<f64> {
        self.table
            .get(&(source.clone(), target.clone()))
            .map(|entry| entry.distance)
    }

    /// Empty before the first `compute`.
    pub fn get_distances(&self) -> impl Iterator<Item = (&G::Vertex, &G::Vertex, f64)> {
        self.table
            .iter()
            .map(|((source, target), entry)| (source, target, entry.distance))
    }

    /// Reconstructs the edge sequence for `(source, target)` by expanding the
    /// witness table with an explicit stack. Zero-length paths are "no path":
    /// `source == target` yields `None` by this API.
    pub fn try_get_path(&self, source: &G::Vertex, target: &G::Vertex) -> Option<Vec<G::Edge>> {
        if source == target {
            return None;
        }
        self.table.get(&(source.clone(), target.clone()))?;

        let mut stack = vec![(source.clone(), target.clone())];
        let mut path = Vec::new();
        // After a failed run the witness table can be circular; bound the
        // expansion rather than walking it forever.
        let mut budget = self.table.len().saturating_mul(2).max(64);
        while let Some((s, t)) = stack.pop() {
            budget = budget.checked_sub(1)?;
            let entry = self.table.get(&(s.clone(), t.clone()))?;
            match &entry.witness {
                Some(PathWitness::Direct(edge)) => path.push(edge.clone()),
                Some(PathWitness::Through(k)) => {
                    stack.push((k.clone(), t));
                    stack.push((s, k.clone()));
                }
                None => return None,
            }
        }
        Some(path)
    }
}
