use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::status::Status;

/// Polling interval, in minutes, used when a service does not set one.
pub const DEFAULT_INTERVAL: u32 = 15;

/// Macro generating the known service type tags and their wire strings.
macro_rules! define_service_types {
    ( $( ($variant:ident, $wire:expr) ),* $(,)? ) => {
        /// The kind of external system a service node talks to.
        ///
        /// Unrecognised tags are preserved verbatim in `Other` so that an
        /// imported configuration exports back unchanged.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum ServiceType {
            $( $variant, )*
            Other(String),
        }

        impl ServiceType {
            pub fn as_str(&self) -> &str {
                match self {
                    $( ServiceType::$variant => $wire, )*
                    ServiceType::Other(tag) => tag.as_str(),
                }
            }
        }

        impl From<String> for ServiceType {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $( $wire => ServiceType::$variant, )*
                    _ => ServiceType::Other(tag),
                }
            }
        }
    };
}

define_service_types! {
    // Cloud platforms
    (GenericHypervisorAws, "GENERIC-HYPERVISOR-AWS"),
    (GenericHypervisorAzure, "GENERIC-HYPERVISOR-AZURE"),
    (GenericHypervisorGcp, "GENERIC-HYPERVISOR-GCP"),
    // CRM & marketing
    (CommonHubspot, "COMMON-HUBSPOT"),
    (CommonSalesforce, "COMMON-SALESFORCE"),
    (CommonMailchimp, "COMMON-MAILCHIMP"),
    (CommonIntercom, "COMMON-INTERCOM"),
    // Project management & collaboration
    (CommonAsana, "COMMON-ASANA"),
    (CommonJira, "COMMON-JIRA"),
    (CommonSlack, "COMMON-SLACK"),
    (CommonZendesk, "COMMON-ZENDESK"),
    (CommonTrello, "COMMON-TRELLO"),
    (CommonClickup, "COMMON-CLICKUP"),
    (CommonNotion, "COMMON-NOTION"),
    (CommonMiro, "COMMON-MIRO"),
    // Development & devops
    (CommonGithub, "COMMON-GITHUB"),
    (CommonGitlab, "COMMON-GITLAB"),
    (CommonVercel, "COMMON-VERCEL"),
    (CommonZapier, "COMMON-ZAPIER"),
    (CommonCircleci, "COMMON-CIRCLECI"),
    (CommonJenkins, "COMMON-JENKINS"),
    (CommonDocker, "COMMON-DOCKER"),
    // Identity
    (CommonAuth0, "COMMON-AUTH0"),
    (CommonOkta, "COMMON-OKTA"),
    // Payments
    (CommonStripe, "COMMON-STRIPE"),
    (CommonTwilio, "COMMON-TWILIO"),
    (CommonPaypal, "COMMON-PAYPAL"),
    // Generic
    (GenericDatabase, "GENERIC-DB-SQL"),
    (GenericNoSql, "GENERIC-DB-NOSQL"),
    (GenericHttp, "GENERIC-HTTP"),
    (GenericGraphQl, "GENERIC-GRAPHQL"),
    (GenericQueue, "GENERIC-QUEUE"),
    (GenericWarehouse, "GENERIC-WAREHOUSE"),
}

impl From<ServiceType> for String {
    fn from(service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single service parameter value. Parameters are flat scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Integer(i) => write!(f, "{}", i),
            ParameterValue::Float(n) => write!(f, "{}", n),
            ParameterValue::Text(s) => write!(f, "{}", s),
        }
    }
}

pub type Parameters = BTreeMap<String, ParameterValue>;

/// What a service node points at: its type tag, a free-text identifier and
/// optional connection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfiguration {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: Parameters,
}

impl ServiceConfiguration {
    pub fn new(service_type: ServiceType, identifier: impl Into<String>) -> Self {
        Self {
            service_type,
            identifier: identifier.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// Payload of a service node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub configuration: ServiceConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl ServiceData {
    pub fn new(configuration: ServiceConfiguration) -> Self {
        Self {
            label: None,
            configuration,
            status: None,
            interval: DEFAULT_INTERVAL,
            color: None,
        }
    }

    /// Sets the polling interval, clamping negative input to zero.
    pub fn set_interval(&mut self, minutes: i64) {
        self.interval = minutes.clamp(0, u32::MAX as i64) as u32;
    }

    /// The status shown for this service, `Unknown` when none is set.
    pub fn current_status(&self) -> Status {
        self.status.unwrap_or_default()
    }
}
