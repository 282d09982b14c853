//! A*: the Dijkstra traversal with a caller-supplied heuristic added to the
//! frontier priority. The heuristic is re-evaluated each time a vertex's
//! distance improves. Admissibility is not validated; an inadmissible
//! heuristic silently yields suboptimal distances rather than an error.

use crate::core::VertexColor;
use crate::error::{AlgorithmError, Result};
use crate::events::SearchEvents;
use crate::lifecycle::{AbortHandle, CancellationToken, Interruptible, Lifecycle};
use crate::relaxer::ShortestDistanceRelaxer;
use crate::rooted::RootedComputation;
use crate::traits::Graph;
use tracing::debug;

use super::frontier::frontier_search;
use super::state::ShortestPathState;

pub struct AStar<'g, G, WF, H>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
{
    graph: &'g G,
    weight: WF,
    heuristic: H,
    state: ShortestPathState<G::Vertex, ShortestDistanceRelaxer>,
    pub lifecycle: Lifecycle,
    pub rooted: RootedComputation<G::Vertex>,
    pub events: SearchEvents<G::Vertex, G::Edge>,
}

impl<'g, G, WF, H> AStar<'g, G, WF, H>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
{
    pub fn new(graph: &'g G, weight: WF, heuristic: H) -> Self {
        Self {
            graph,
            weight,
            heuristic,
            state: ShortestPathState::new(ShortestDistanceRelaxer),
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

    /// With a target set the traversal returns as soon as the target is
    /// finished instead of settling the whole component.
    pub fn set_target(&mut self, target: G::Vertex) -> Result<()> {
        if !self.graph.contains_vertex(&target) {
            return Err(AlgorithmError::vertex_not_found(&target));
        }
        self.rooted.set_target(target);
        Ok(())
    }

    pub fn clear_root(&mut self) {
        self.rooted.clear_root();
    }

    pub fn clear_target(&mut self) {
        self.rooted.clear_target();
    }

    pub fn compute_from(&mut self, root: G::Vertex) -> Result<()> {
        self.set_root(root)?;
        self.compute()
    }

    /// Sugar for `set_root`, `set_target`, `compute`.
    pub fn compute_between(&mut self, root: G::Vertex, target: G::Vertex) -> Result<()> {
        self.set_root(root)?;
        self.set_target(target)?;
        self.compute()
    }

    pub fn compute(&mut self) -> Result<()> {
        self.lifecycle.begin()?;
        debug!(
            vertices = self.graph.order(),
            edges = self.graph.size(),
            "astar: computing"
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
        let heuristic = &self.heuristic;
        let priority = |vertex: &G::Vertex, distance: f64| distance + heuristic(vertex);
        let target = self.rooted.target().cloned();

        match self.rooted.root().cloned() {
            Some(root) => frontier_search(
                self.graph,
                &self.weight,
                &mut self.state,
                &self.events,
                token,
                &root,
                &priority,
                target.as_ref(),
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
                            &priority,
                            target.as_ref(),
                        )?;
                        if let Some(t) = &target
                            && self.state.color(t) == Some(VertexColor::Black)
                        {
                            break;
                        }
                    }
                }
                Ok(())
            }
        }
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
