use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::types::{ConfigDocument, ConfigFlow};
use crate::error::{ExportError, ImportError};

/// Textual encodings of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ConfigFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Yaml => write!(f, "YAML"),
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            other => Err(format!("unknown configuration format '{}'", other)),
        }
    }
}

/// A configuration entry that could not be read and was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: String,
}

/// Result of reading a configuration document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedConfig {
    pub flows: Vec<ConfigFlow>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parses a configuration document.
///
/// Accepts either `{ "flows": [...] }` or a bare list of flows. Syntax
/// errors and a malformed top level abort the whole parse; a single entry
/// that does not describe a flow is skipped and reported instead.
pub fn parse_config(input: &str, format: ConfigFormat) -> Result<ParsedConfig, ImportError> {
    if input.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let parse_error = |message: String| ImportError::Parse { format, message };
    let document: Value = match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|e| parse_error(e.to_string()))?,
        ConfigFormat::Yaml => serde_yaml::from_str(input).map_err(|e| parse_error(e.to_string()))?,
    };

    let entries = match document {
        Value::Object(mut map) => match map.remove("flows") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ImportError::MissingFlows),
        },
        Value::Array(entries) => entries,
        other => return Err(ImportError::InvalidStructure(describe(&other).to_string())),
    };

    let mut parsed = ParsedConfig::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ConfigFlow>(entry) {
            Ok(flow) => parsed.flows.push(flow),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable flow entry");
                parsed.skipped.push(SkippedEntry {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(parsed)
}

/// Renders flows as a `{ flows: [...] }` document.
pub fn render_config(flows: &[ConfigFlow], format: ConfigFormat) -> Result<String, ExportError> {
    let document = ConfigDocument {
        flows: flows.to_vec(),
    };
    let serialize_error = |message: String| ExportError::Serialize { format, message };
    match format {
        ConfigFormat::Json => {
            serde_json::to_string_pretty(&document).map_err(|e| serialize_error(e.to_string()))
        }
        ConfigFormat::Yaml => {
            serde_yaml::to_string(&document).map_err(|e| serialize_error(e.to_string()))
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
