//! The event surface a canvas host drives.
//!
//! The host forwards raw canvas gestures as [`CanvasEvent`]s and menu picks
//! as method calls; the editor applies them to its [`Graph`] and reports an
//! [`EditOutcome`]. User-facing problems (bad imports, clipboard failures)
//! are also queued as [`Notice`]s for the host to display.

use rand::Rng;
use tracing::{info, warn};

use crate::catalog::{ServiceCatalog, ServiceOption};
use crate::config::{self, ConfigFormat};
use crate::error::{ClipboardError, EditError, ExportError, ImportError};
use crate::geometry::{self, Transform, Viewport};
use crate::graph::Graph;
use crate::layout::LayoutPreset;
use crate::model::{Position, Status};
use crate::options::EditorOptions;

/// Horizontal drop position of services picked from the menu.
pub const SELECTED_SERVICE_X: f64 = -256.0;
/// Services picked from the menu land at a random height below this.
pub const SELECTED_SERVICE_MAX_Y: f64 = 256.0;

/// Source of text for clipboard imports.
pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// Raw gestures reported by the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    NodeMoved { node_id: String, position: Position },
    EdgeProposed { source: String, target: String },
    EdgeReconnected {
        edge_id: String,
        source: String,
        target: String,
    },
    EdgeDeleted { edge_id: String },
    NodeDeleted { node_id: String },
    ViewportResized(Viewport),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Applied,
    Rejected(EditError),
    /// The editor is locked, or the event does not apply.
    Ignored,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    fn from_result<T, E: Into<EditError>>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => EditOutcome::Applied,
            Err(e) => EditOutcome::Rejected(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the host to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    graph: Graph,
    options: EditorOptions,
    catalog: ServiceCatalog,
    viewport: Option<Viewport>,
    transform: Transform,
    notices: Vec<Notice>,
}

impl Editor {
    /// An editor over an empty graph.
    pub fn new(options: EditorOptions, catalog: ServiceCatalog) -> Self {
        Self {
            graph: Graph::new(),
            options,
            catalog,
            viewport: None,
            transform: Transform::default(),
            notices: Vec::new(),
        }
    }

    /// An editor opened on the default layout, as the host shows it first.
    pub fn with_default_layout(
        options: EditorOptions,
        catalog: ServiceCatalog,
    ) -> Result<Self, EditError> {
        let mut editor = Self::new(options, catalog);
        editor.graph = Graph::from_preset(LayoutPreset::Default)?;
        Ok(editor)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_locked(&self) -> bool {
        self.options.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.options.locked = locked;
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hands queued notices to the host and clears the queue.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one canvas gesture.
    pub fn handle(&mut self, event: CanvasEvent) -> EditOutcome {
        if let CanvasEvent::ViewportResized(viewport) = event {
            self.viewport = Some(viewport);
            self.fit_view();
            return EditOutcome::Applied;
        }
        if self.is_locked() {
            return EditOutcome::Ignored;
        }

        match event {
            CanvasEvent::NodeMoved { node_id, position } => {
                let draggable = self.graph.node(&node_id).map(|n| n.draggable);
                if draggable == Some(false) {
                    return EditOutcome::Ignored;
                }
                EditOutcome::from_result(self.graph.move_node(&node_id, position))
            }
            CanvasEvent::EdgeProposed { source, target } => {
                EditOutcome::from_result(self.graph.connect(&source, &target))
            }
            CanvasEvent::EdgeReconnected {
                edge_id,
                source,
                target,
            } => EditOutcome::from_result(self.graph.reconnect(&edge_id, &source, &target)),
            CanvasEvent::EdgeDeleted { edge_id } => {
                EditOutcome::from_result(self.graph.remove_edge(&edge_id))
            }
            CanvasEvent::NodeDeleted { node_id } => {
                EditOutcome::from_result(self.graph.remove_node(&node_id))
            }
            CanvasEvent::ViewportResized(_) => EditOutcome::Ignored,
        }
    }

    /// Drops a new service from the menu onto the canvas and returns its id.
    pub fn select_service(&mut self, option: &ServiceOption) -> Option<String> {
        if self.is_locked() {
            return None;
        }
        let y = rand::rng().random_range(0.0..SELECTED_SERVICE_MAX_Y);
        let id = self.graph.add_service(
            option.configuration.clone(),
            Some(option.label.clone()),
            option.status,
            Position::new(SELECTED_SERVICE_X, y),
        );
        Some(id)
    }

    /// Selects a catalog entry by its menu label.
    pub fn select_service_by_label(&mut self, label: &str) -> Option<String> {
        let option = self.catalog.find(label)?.clone();
        self.select_service(&option)
    }

    /// Replaces the whole graph with a prebuilt layout.
    pub fn apply_preset(&mut self, preset: LayoutPreset) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }
        match Graph::from_preset(preset) {
            Ok(graph) => {
                self.graph = graph;
                self.fit_view();
                EditOutcome::Applied
            }
            Err(e) => EditOutcome::Rejected(e.into()),
        }
    }

    pub fn add_flow(&mut self) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }
        EditOutcome::from_result(self.graph.add_flow())
    }

    /// Removes the flow owning `node_id`.
    pub fn remove_flow(&mut self, node_id: &str) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }
        EditOutcome::from_result(self.graph.remove_flow(node_id))
    }

    pub fn set_service_status(&mut self, node_id: &str, status: Status) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }
        EditOutcome::from_result(self.graph.set_service_status(node_id, status))
    }

    /// Replaces the graph with the flows described by `text`.
    ///
    /// The import is all or nothing: on failure the current graph stays as it
    /// was and an error notice is queued. Unreadable entries inside an
    /// otherwise valid document are skipped with a warning.
    pub fn import_text(&mut self, text: &str, format: ConfigFormat) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }

        let parsed = match config::parse_config(text, format) {
            Ok(parsed) => parsed,
            Err(e) => return self.import_failed(e),
        };
        let graph = match Graph::from_config(&parsed.flows) {
            Ok(graph) => graph,
            Err(e) => {
                self.notices
                    .push(Notice::new(NoticeLevel::Error, e.to_string()));
                return EditOutcome::Rejected(e.into());
            }
        };

        self.graph = graph;
        self.fit_view();
        info!(
            flows = parsed.flows.len(),
            skipped = parsed.skipped.len(),
            %format,
            "graph replaced from configuration"
        );
        for entry in &parsed.skipped {
            self.notices.push(Notice::new(
                NoticeLevel::Warning,
                format!("Skipped flow #{}: {}", entry.index + 1, entry.reason),
            ));
        }
        self.notices.push(Notice::new(
            NoticeLevel::Info,
            format!("Imported {} flow(s)", parsed.flows.len()),
        ));
        EditOutcome::Applied
    }

    /// Imports whatever text the clipboard currently holds.
    pub fn import_from_clipboard<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
        format: ConfigFormat,
    ) -> EditOutcome {
        if self.is_locked() {
            return EditOutcome::Ignored;
        }
        match clipboard.read_text() {
            Ok(text) => self.import_text(&text, format),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                self.notices
                    .push(Notice::new(NoticeLevel::Warning, e.to_string()));
                EditOutcome::Rejected(e.into())
            }
        }
    }

    /// Renders the exportable flows of the graph. Allowed while locked.
    pub fn export_text(&self, format: ConfigFormat) -> Result<String, ExportError> {
        config::render_config(&self.graph.to_config(), format)
    }

    /// Centers the graph in the last known viewport.
    pub fn fit_view(&mut self) -> Option<Transform> {
        let viewport = self.viewport?;
        let bounds = self.graph.bounds()?;
        self.transform = geometry::fit_view(bounds, viewport);
        Some(self.transform)
    }

    fn import_failed(&mut self, error: ImportError) -> EditOutcome {
        warn!(error = %error, "configuration import failed");
        self.notices
            .push(Notice::new(NoticeLevel::Error, error.to_string()));
        EditOutcome::Rejected(error.into())
    }
}
