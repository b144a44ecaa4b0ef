use crate::config::ConfigFormat;
use crate::model::NodeType;
use thiserror::Error;

/// Why a proposed connection was refused.
///
/// Rejections are an expected outcome of dragging edges around; callers drop
/// the proposal and leave the graph untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("An edge from '{source_id}' to '{target_id}' already exists")]
    Duplicate {
        source_id: String,
        target_id: String,
    },

    #[error("Node '{0}' does not exist")]
    UnknownNode(String),

    #[error("A {source_type} cannot feed a {target_type}")]
    IllegalTarget {
        source_type: NodeType,
        target_type: NodeType,
    },

    #[error("Modelize stage may only feed its partner '{expected}', not '{found}'")]
    NotPartner { expected: String, found: String },

    #[error("The {handle} handle of '{node_id}' is already connected")]
    HandleOccupied { node_id: String, handle: Handle },

    #[error("Connecting '{source_id}' to '{target_id}' would create a cycle")]
    Cycle {
        source_id: String,
        target_id: String,
    },
}

/// Side of a node an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Incoming side.
    Push,
    /// Outgoing side.
    Pull,
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handle::Push => write!(f, "push"),
            Handle::Pull => write!(f, "pull"),
        }
    }
}

/// Errors raised by graph mutations. A failed mutation leaves the graph as
/// it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("No flow owns node '{0}'")]
    FlowNotFound(String),

    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("Node '{node_id}' references parent '{parent_id}', which does not exist")]
    MissingParent { node_id: String, parent_id: String },

    #[error("Node '{node_id}' cannot be placed inside '{parent_id}', which is a {parent_type}")]
    IllegalParent {
        node_id: String,
        parent_id: String,
        parent_type: NodeType,
    },

    #[error("The graph has no data layer to hold flows")]
    NoDatalayer,

    #[error("Node '{0}' is not a service")]
    NotAService(String),

    #[error("Service '{0}' is fed by another node; its status is derived")]
    DerivedStatus(String),

    #[error("Stage '{stage_id}' points at partner '{partner_id}', which is not its sibling")]
    BrokenPartner {
        stage_id: String,
        partner_id: String,
    },

    #[error("Stage '{0}' is not part of any flow")]
    StageOutsideFlow(String),

    #[error("Connection rejected: {0}")]
    Connection(#[from] Rejection),
}

/// Errors surfaced to the user when importing a configuration. Any of these
/// aborts the whole import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Please enter a configuration")]
    Empty,

    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    #[error("Invalid configuration format: expected an object or a list of flows, found {0}")]
    InvalidStructure(String),

    #[error("Invalid configuration: missing flows")]
    MissingFlows,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Failed to render {format} configuration: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Could not access snapshot file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot is not a valid layout: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Snapshot describes an inconsistent graph: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to read from clipboard: {0}")]
pub struct ClipboardError(pub String);

/// Any failure an editor action can report back to the host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl From<Rejection> for EditError {
    fn from(rejection: Rejection) -> Self {
        EditError::Graph(GraphError::Connection(rejection))
    }
}
