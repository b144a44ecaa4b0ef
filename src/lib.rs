//! # Datalayer - Pipeline Diagram Editor Core
//!
//! **Datalayer** is the headless core of a node-based diagram editor for data
//! pipelines. Services (external systems) feed a two-stage *flow* inside a
//! shared *data layer*: a **Modelize** stage validates and standardizes the
//! data and optionally stores it in the data layer's **warehouse**, then its
//! partner **Egress** stage pushes it to a destination service.
//!
//! ## Core Workflow
//!
//! 1.  **Build a graph**: start from a preset ([`layout::LayoutPreset`]), a
//!     saved [`layout::Layout`] snapshot, or an exported configuration.
//! 2.  **Edit it**: every logical edit is one [`graph::Graph`] method. Each
//!     one validates, mutates and then recomputes geometry and statuses, so
//!     the graph is always consistent between calls. Proposed connections go
//!     through the [`rules`] engine and are refused with a [`error::Rejection`].
//! 3.  **Export**: [`graph::Graph::to_config`] turns every fully wired flow
//!     into the `{ flows: [...] }` document the orchestrator runs, rendered
//!     as JSON or YAML by [`config::render_config`].
//!
//! Hosts that drive a canvas use [`editor::Editor`], which maps gestures and
//! menu picks onto the graph and honours the embedding options.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datalayer::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::from_preset(LayoutPreset::Empty)?;
//!     let flow = graph.flows()[0].clone();
//!
//!     let hubspot = graph.add_service(
//!         ServiceConfiguration::new(ServiceType::CommonHubspot, "Hubspot"),
//!         Some("Hubspot".to_string()),
//!         Some(Status::Success),
//!         Position::new(-312.0, 0.0),
//!     );
//!     let salesforce = graph.add_service(
//!         ServiceConfiguration::new(ServiceType::CommonSalesforce, "Salesforce"),
//!         Some("Salesforce".to_string()),
//!         None,
//!         Position::new(296.0, 0.0),
//!     );
//!
//!     graph.connect(&hubspot, &flow.modelize)?;
//!     graph.connect(&flow.modelize, &flow.egress)?;
//!     graph.connect(&flow.egress, &salesforce)?;
//!
//!     // Statuses follow the source.
//!     assert_eq!(graph.status_of(&salesforce), Status::Success);
//!
//!     let yaml = render_config(&graph.to_config(), ConfigFormat::Yaml)?;
//!     println!("{}", yaml);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod model;
pub mod options;
pub mod prefab;
pub mod prelude;
pub mod propagation;
pub mod rules;
