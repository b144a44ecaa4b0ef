//! Whole-graph layouts: the prebuilt presets offered in the menu and the
//! JSON snapshot format used to save and restore an editing session.

mod presets;
mod snapshot;

use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node};
use crate::prefab::{Datalayer, Flow};

pub use presets::LayoutPreset;

/// A complete, serializable picture of the editor graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datalayer: Option<Datalayer>,
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}
