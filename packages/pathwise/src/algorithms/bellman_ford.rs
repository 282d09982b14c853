//! Bellman-Ford single-source shortest paths: tolerates negative weights,
//! `O(V * E)`. Runs up to `|V|` full passes over the edge list with early
//! exit once a pass relaxes nothing, then one more scan; an edge that could
//! still relax means a negative cycle reachable from the root.
//!
//! The negative cycle is reported through [`BellmanFord::found_negative_cycle`],
//! not an error; when the flag is set the distances are not trustworthy.

use crate::core::VertexColor;
use crate::error::{AlgorithmError, Result};
use crate::events::{SearchEvents, TreeEdge};
use crate::lifecycle::{AbortHandle, CancellationToken, Interruptible, Lifecycle};
use crate::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use crate::rooted::RootedComputation;
use crate::traits::Graph;
use tracing::debug;

use super::state::{ShortestPathState, ensure_weight};

pub struct BellmanFord<'g, G, WF, R = ShortestDistanceRelaxer>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer + Copy,
{
    graph: &'g G,
    weight: WF,
    state: ShortestPathState<G::Vertex, R>,
    found_negative_cycle: bool,
    pub lifecycle: Lifecycle,
    pub rooted: RootedComputation<G::Vertex>,
    pub events: SearchEvents<G::Vertex, G::Edge>,
}

impl<'g, G, WF> BellmanFord<'g, G, WF>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weight: WF) -> Self {
        Self::with_relaxer(graph, weight, ShortestDistanceRelaxer)
    }
}

impl<'g, G, WF, R> BellmanFord<'g, G, WF, R>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer + Copy,
{
    pub fn with_relaxer(graph: &'g G, weight: WF, relaxer: R) -> Self {
        Self {
            graph,
            weight,
            state: ShortestPathState::new(relaxer),
            found_negative_cycle: false,
            lifecycle: Lifecycle::new(),
            rooted: RootedComputation::new(),
            events: SearchEvents::new(),
        }
    }

    pub fn set_root(&mut self, root: G::Vertex) -> Result<()> {
        if !self.graph.contains_vertex(&root) {
            return Err(AlgorithmError::vertex_not_found(&root));
        }
        self.rooted.set_root(root);
        Ok(())
    }

    pub fn clear_root(&mut self) {
        self.rooted.clear_root();
    }

    /// Valid only after a finished run; distances are not trustworthy when
    /// this returns true.
    pub fn found_negative_cycle(&self) -> bool {
        self.found_negative_cycle
    }

    pub fn compute_from(&mut self, root: G::Vertex) -> Result<()> {
        self.set_root(root)?;
        self.compute()
    }

    pub fn compute(&mut self) -> Result<()> {
        self.lifecycle.begin()?;
        debug!(
            vertices = self.graph.order(),
            edges = self.graph.size(),
            "bellman-ford: computing"
        );
        self.initialize();
        let token = self.lifecycle.token();
        let outcome = self.run(&token);
        self.clean();
        self.lifecycle.settle(outcome)
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.lifecycle.abort_handle()
    }

    fn initialize(&mut self) {
        self.found_negative_cycle = false;
        self.state.initialize(self.graph.vertices());
        for vertex in self.graph.vertices() {
            self.events.initialize_vertex.emit(vertex);
        }
    }

    fn run(&mut self, token: &CancellationToken) -> Interruptible<()> {
        // With no root set, fall back to the first vertex in enumeration
        // order (the multi-source sweep is a Dijkstra/A* behavior only).
        let root = match self.rooted.root().cloned() {
            Some(root) => root,
            None => match self.graph.vertices().next().cloned() {
                Some(first) => first,
                None => return Ok(()),
            },
        };
        self.state.set_distance(root, 0.0);

        let edges: Vec<G::Edge> = self.graph.edges().cloned().collect();
        for _pass in 0..self.graph.order() {
            token.check()?;
            let mut relaxed_any = false;
            for edge in &edges {
                self.events.examine_edge.emit(edge);
                let w = ensure_weight((self.weight)(edge), edge)?;
                match self.state.relax(edge, w) {
                    Some(distance) => {
                        relaxed_any = true;
                        self.events.tree_edge.emit(&TreeEdge {
                            edge: edge.clone(),
                            distance,
                        });
                    }
                    None => self.events.edge_not_relaxed.emit(edge),
                }
            }
            if !relaxed_any {
                break;
            }
        }

        token.check()?;
        for edge in &edges {
            let w = ensure_weight((self.weight)(edge), edge)?;
            if self.state.would_relax(edge, w) {
                debug!(edge = ?edge, "bellman-ford: negative cycle witness");
                self.found_negative_cycle = true;
                break;
            }
        }
        Ok(())
    }

    fn clean(&mut self) {}

    pub fn try_get_distance(&self, vertex: &G::Vertex) -> Option<f64> {
        self.state.try_get_distance(vertex)
    }

    pub fn get_distance(&self, vertex: &G::Vertex) -> Result<f64> {
        self.state
            .try_get_distance(vertex)
            .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
    }

    pub fn get_distances(&self) -> impl Iterator<Item = (&G::Vertex, f64)> {
        self.state.distances()
    }

    pub fn get_vertex_color(&self, vertex: &G::Vertex) -> Result<VertexColor> {
        self.state
            .color(vertex)
            .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
    }
}
