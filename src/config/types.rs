use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{DEFAULT_INTERVAL, Parameters, ServiceType};

/// One orchestrator-consumable pipeline: a source pulled on an interval,
/// modelized, optionally warehoused and pushed to a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFlow {
    pub name: String,
    #[serde(default)]
    pub warehouse: bool,
    #[serde(default = "default_interval", deserialize_with = "clamped_interval")]
    pub interval: u32,
    pub source: ConfigEndpoint,
    pub destination: ConfigEndpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEndpoint {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub configuration: EndpointConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfiguration {
    /// Slugified service identifier.
    pub identifier: String,
    #[serde(default)]
    pub parameters: Parameters,
}

/// Top-level document exchanged with the orchestrator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub flows: Vec<ConfigFlow>,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

fn clamped_interval<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = f64::deserialize(deserializer)?;
    Ok(minutes.clamp(0.0, u32::MAX as f64) as u32)
}
