//! Single-source shortest (or critical) paths on acyclic graphs: one
//! relaxation pass in topological order, `O(V + E)`, no priority structure.
//!
//! Swapping in [`CriticalDistanceRelaxer`](crate::relaxer::CriticalDistanceRelaxer)
//! turns the same pass into a longest-path / critical-path computation with
//! no other change, which is what scheduling-style callers use.

use crate::core::VertexColor;
use crate::error::{AlgorithmError, Result};
use crate::events::{SearchEvents, TreeEdge};
use crate::lifecycle::{AbortHandle, CancellationToken, Interrupt, Interruptible, Lifecycle};
use crate::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use crate::rooted::RootedComputation;
use crate::topo::topological_sort;
use crate::traits::{Edge, Graph};
use tracing::debug;

use super::state::{ShortestPathState, ensure_weight};

pub struct DagShortestPath<'g, G, WF, R = ShortestDistanceRelaxer>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
    R: DistanceRelaxer + Copy,
{
    graph: &'g G,
    weight: WF,
    state: ShortestPathState<G::Vertex, R>,
    pub lifecycle: Lifecycle,
    pub rooted: RootedComputation<G::Vertex>,
    pub events: SearchEvents<G::Vertex, G::Edge>,
}

impl<'g, G, WF> DagShortestPath<'g, G, WF>
where
    G: Graph,
    WF: Fn(&G::Edge) -> f64,
{
    pub fn new(graph: &'g G, weight: WF) -> Self {
        Self::with_relaxer(graph, weight, ShortestDistanceRelaxer)
    }
}

impl<'g, G, WF, R> DagShortestPath<'g, G, WF, R>
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

    pub fn compute_from(&mut self, root: G::Vertex) -> Result<()> {
        self.set_root(root)?;
        self.compute()
    }

    pub fn compute(&mut self) -> Result<()> {
        self.lifecycle.begin()?;
        debug!(
            vertices = self.graph.order(),
            edges = self.graph.size(),
            "dag shortest path: computing"
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
        // Cycle detection happens before any relaxation.
        let order = topological_sort(self.graph).map_err(Interrupt::from)?;

        // With no root set, fall back to the head of the topological order.
        let root = match self.rooted.root().cloned() {
            Some(root) => Some(root),
            None => order.first().cloned(),
        };
        let Some(root) = root else {
            return Ok(());
        };
        self.state.set_distance(root.clone(), 0.0);
        self.state.set_color(root.clone(), VertexColor::Gray);
        self.events.discover_vertex.emit(&root);

        // Predecessors are finalized before their successors are visited, so
        // one forward pass suffices.
        for vertex in &order {
            token.check()?;
            self.events.examine_vertex.emit(vertex);
            for edge in self.graph.out_edges(vertex) {
                self.events.examine_edge.emit(edge);
                let w = ensure_weight((self.weight)(edge), edge)?;
                match self.state.relax(edge, w) {
                    Some(distance) => {
                        self.state.set_color(edge.target().clone(), VertexColor::Gray);
                        self.events.discover_vertex.emit(edge.target());
                        self.events.tree_edge.emit(&TreeEdge {
                            edge: edge.clone(),
                            distance,
                        });
                    }
                    None => self.events.edge_not_relaxed.emit(edge),
                }
            }
            self.state.set_color(vertex.clone(), VertexColor::Black);
            self.events.finish_vertex.emit(vertex);
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
