pub mod algorithms;
pub mod core;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod observers;
pub mod relaxer;
pub mod rooted;
pub mod storage;
pub mod topo;
pub mod traits;

pub use algorithms::*;
pub use self::core::*;
pub use error::*;
pub use events::*;
pub use lifecycle::*;
pub use observers::*;
pub use relaxer::*;
pub use rooted::*;
pub use storage::*;
pub use topo::*;
pub use traits::*;
