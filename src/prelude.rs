//! Prelude module for convenient imports
//!
//! Re-exports the types most hosts need: the graph, the editor surface,
//! the entity model and the configuration translator.
//!
//! # Example
//!
//! ```rust,no_run
//! use datalayer::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/pipelines.yaml")?;
//! let parsed = parse_config(&text, ConfigFormat::Yaml)?;
//! let graph = Graph::from_config(&parsed.flows)?;
//! println!("{} flows imported", graph.flows().len());
//! # Ok(())
//! # }
//! ```

// Graph and editor
pub use crate::editor::{CanvasEvent, Clipboard, EditOutcome, Editor, Notice, NoticeLevel};
pub use crate::graph::Graph;
pub use crate::layout::{Layout, LayoutPreset};

// Entity model
pub use crate::model::{
    Edge, EdgeIndicator, EdgeShape, Node, NodeKind, NodeType, ParameterValue, Position,
    ServiceConfiguration, ServiceData, ServiceType, Stage, Status,
};
pub use crate::prefab::{Datalayer, Flow};

// Configuration translation
pub use crate::config::{ConfigFlow, ConfigFormat, parse_config, render_config};

// Host data
pub use crate::catalog::{ServiceCatalog, ServiceOption};
pub use crate::options::EditorOptions;

// Error types
pub use crate::error::{
    ClipboardError, EditError, ExportError, GraphError, ImportError, Rejection, SnapshotError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
