use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::Status;

/// The two processing steps of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Modelize,
    Egress,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Modelize => write!(f, "Modelize"),
            Stage::Egress => write!(f, "Egress"),
        }
    }
}

/// Payload of a stage node.
///
/// `partner_id` is a non-owning link to the sibling stage of the same flow;
/// resolve it through the graph, never cache the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageData {
    pub stage: Stage,
    pub partner_id: String,
    #[serde(default)]
    pub status: Status,
}
