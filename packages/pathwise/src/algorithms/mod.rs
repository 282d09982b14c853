pub mod astar;
pub mod bellman_ford;
pub mod dag;
pub mod dijkstra;
pub mod floyd_warshall;
mod frontier;
mod state;

pub use astar::*;
pub use bellman_ford::*;
pub use dag::*;
pub use dijkstra::*;
pub use floyd_warshall::*;
