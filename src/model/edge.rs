use serde::{Deserialize, Serialize};

use super::status::Status;

/// Glyph travelling along an edge while data moves through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeShape {
    #[default]
    Circle,
    Square,
    Triangle,
}

/// How the canvas should animate an edge, derived from its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeIndicator {
    /// A glyph moves from source to target.
    Moving,
    /// The edge blinks to flag a failed run.
    Blinking,
    Neutral,
}

impl From<Status> for EdgeIndicator {
    fn from(status: Status) -> Self {
        if status.is_success() {
            EdgeIndicator::Moving
        } else if status.is_error() {
            EdgeIndicator::Blinking
        } else {
            EdgeIndicator::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(default)]
    pub shape: EdgeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    #[serde(default)]
    pub data: EdgeData,
}

fn default_z_index() -> i32 {
    1
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        shape: EdgeShape,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            z_index: default_z_index(),
            data: EdgeData {
                shape,
                status: None,
            },
        }
    }

    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The last status snapshot written by propagation, `Unknown` if none.
    pub fn status(&self) -> Status {
        self.data.status.unwrap_or_default()
    }

    pub fn indicator(&self) -> EdgeIndicator {
        EdgeIndicator::from(self.status())
    }
}
