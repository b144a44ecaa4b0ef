//! Entity and payload types of the editor graph.

pub mod edge;
pub mod node;
pub mod service;
pub mod stage;
pub mod status;

pub use edge::*;
pub use node::*;
pub use service::*;
pub use stage::*;
pub use status::*;
