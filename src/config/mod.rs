//! Translation between the editor graph and the orchestrator's pipeline
//! configuration.
//!
//! [`to_config`] and [`from_config`] are structural inverses: importing an
//! exported configuration and exporting it again yields the same document,
//! node ids aside.

mod export;
mod format;
mod import;
mod slug;
mod types;

pub use export::to_config;
pub use format::{ConfigFormat, ParsedConfig, SkippedEntry, parse_config, render_config};
pub use import::from_config;
pub use slug::slugify;
pub use types::{ConfigDocument, ConfigEndpoint, ConfigFlow, EndpointConfiguration};
