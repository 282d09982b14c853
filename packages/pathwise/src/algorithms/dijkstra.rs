//! Single-source shortest paths for non-negative weights, `O((V+E) log V)`
//! via the decrease-key frontier.

use crate::error::{AlgorithmError, Result};
use crate::events::SearchEvents;
use crate::core::VertexColor;
use crate::lifecycle::{AbortHandle, CancellationToken, Interruptible, Lifecycle};
use crate::relaxer::ShortestDistanceRelaxer;
use crate::rooted::RootedComputation;
use crate::traits::Graph;
use tracing::debug;

use super::frontier::frontier_search;
use super::state::ShortestPathState;

/// Dijkstra's algorithm over any [`Graph`] and weight function.
///
/// With a root set, one rooted pass; with no root, a multi-source sweep over
/// every remaining undiscovered vertex, producing a forest whose components
/// each have locally-final distances. Any negative-weight edge examined fails
/// the run with [`AlgorithmError::NegativeWeight`].
pub struct Dijkstra<'g, G, WF>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
{
    graph: &'g G,
    weight: WF,
    state: ShortestPathState<G::Vertex, ShortestDistanceRelaxer>,
    pub lifecycle: Lifecycle,
    pub rooted: RootedComputation<G::Vertex>,
    pub events: SearchEvents<G::Vertex, G::Edge>,
}

impl<'g, G, WF> Dijkstra<'g, G, WF>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weight: WF) -> Self {
        Self {
            graph,
            weight,
            state: ShortestPathState::new(ShortestDistanceRelaxer),
            lifecycle: Lifecycle::new(),
            rooted: RootedComputation::new(),
            events: SearchEvents::new(),
        }
    }

    /// Fails with `VertexNotFound` if `root` is not in the graph.
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

    /// Sugar for `set_root(root)` followed by `compute()`.
    pub fn compute_from(&mut self, root: G::Vertex) -> Result<()> {
        self.set_root(root)?;
        self.compute()
    }

    pub fn compute(&mut self) -> Result<()> {
        self.lifecycle.begin()?;
        debug!(
            vertices = self.graph.order(),
            edges = self.graph.size(),
            "dijkstra: computing"
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
        self.state.initialize(self.graph.vertices());
        for vertex in self.graph.vertices() {
            self.events.initialize_vertex.emit(vertex);
        }
    }

    fn run(&mut self, token: &CancellationToken) -> Interruptible<()> {
        match self.rooted.root().cloned() {
            Some(root) => frontier_search(
                self.graph,
                &self.weight,
                &mut self.state,
                &self.events,
                token,
                &root,
                &|_, distance| distance,
                None,
            ),
            None => {
                let roots: Vec<G::Vertex> = self.graph.vertices().cloned().collect();
                for root in roots {
                    if self.state.color(&root) == Some(VertexColor::White) {
                        frontier_search(
                            self.graph,
                            &self.weight,
                            &mut self.state,
                            &self.events,
                            token,
                            &root,
                            &|_, distance| distance,
                            None,
                        )?;
                    }
                }
                Ok(())
            }
        }
    }

    fn clean(&mut self) {
        // distance and color maps stay readable until the next compute
    }

    pub fn try_get_distance(&self, vertex: &G::Vertex) -> Option<f64> {
        self.state.try_get_distance(vertex)
    }

    pub fn get_distance(&self, vertex: &G::Vertex) -> Result<f64> {
        self.state
            .try_get_distance(vertex)
            .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
    }

    /// Empty before the first `compute`.
    pub fn get_distances(&self) -> impl Iterator<Item = (&G::Vertex, f64)> {
        self.state.distances()
    }

    /// Fails with `VertexNotFound` if the vertex was never visited this run.
    pub fn get_vertex_color(&self, vertex: &G::Vertex) -> Result<VertexColor> {
        self.state
            .color(vertex)
            .ok_or_else(|| AlgorithmError::vertex_not_found(vertex))
    }
}
