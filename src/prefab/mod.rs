//! Canonical sub-graphs with consistent ids and geometry.

mod datalayer;
mod flow;
mod id;

pub use datalayer::*;
pub use flow::*;
pub use id::*;
