use serde::{Deserialize, Serialize};
use std::fmt;

use super::service::ServiceData;
use super::stage::{Stage, StageData};
use super::status::Status;

/// A point on the canvas. For parented nodes it is relative to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Movement constraint of a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    /// The node stays inside its parent's bounds.
    Parent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_size: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_size: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationData {
    pub text: String,
    #[serde(default)]
    pub text_alignment: TextAlignment,
    #[serde(default)]
    pub show_arrow: bool,
    #[serde(default)]
    pub is_pinned: bool,
}

/// The closed set of node variants, tagged the way the canvas expects
/// (`{"type": "stage", "data": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeKind {
    Service(ServiceData),
    Stage(StageData),
    Container(ContainerData),
    Warehouse(WarehouseData),
    Annotation(AnnotationData),
}

/// Variant tag of a node without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Service,
    Stage(Stage),
    Container,
    Warehouse,
    Annotation,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Service => write!(f, "service"),
            NodeType::Stage(stage) => write!(f, "stage ({})", stage),
            NodeType::Container => write!(f, "container"),
            NodeType::Warehouse => write!(f, "warehouse"),
            NodeType::Annotation => write!(f, "annotation"),
        }
    }
}

/// A vertex of the editor graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(flatten)]
    pub kind: NodeKind,
}

fn default_true() -> bool {
    true
}

impl Node {
    pub fn new(id: impl Into<String>, position: Position, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            position,
            parent_id: None,
            extent: None,
            size: None,
            z_index: 0,
            draggable: true,
            kind,
        }
    }

    /// Parents the node and confines it to the parent's bounds.
    pub fn inside(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self.extent = Some(Extent::Parent);
        self
    }

    /// Parents the node without confining it; used for annotations that
    /// follow the node they describe.
    pub fn anchored_to(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.draggable = false;
        self
    }

    pub fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Service(_) => NodeType::Service,
            NodeKind::Stage(data) => NodeType::Stage(data.stage),
            NodeKind::Container(_) => NodeType::Container,
            NodeKind::Warehouse(_) => NodeType::Warehouse,
            NodeKind::Annotation(_) => NodeType::Annotation,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceData> {
        match &self.kind {
            NodeKind::Service(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_service_mut(&mut self) -> Option<&mut ServiceData> {
        match &mut self.kind {
            NodeKind::Service(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_stage(&self) -> Option<&StageData> {
        match &self.kind {
            NodeKind::Stage(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    pub fn is_warehouse(&self) -> bool {
        matches!(self.kind, NodeKind::Warehouse(_))
    }

    /// The status currently displayed on the node. Nodes that never carry a
    /// status report `Unknown`.
    pub fn status(&self) -> Status {
        match &self.kind {
            NodeKind::Service(data) => data.current_status(),
            NodeKind::Stage(data) => data.status,
            _ => Status::Unknown,
        }
    }
}
