//! Selectable service definitions offered by the host's service menu.
//!
//! The catalog is plain data: hosts usually inject their own (translated)
//! list as JSON, and [`ServiceCatalog::builtin`] provides the stock one.

use serde::{Deserialize, Serialize};

use crate::model::{ParameterValue, ServiceConfiguration, ServiceType, Status};

/// One entry of the service menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub configuration: ServiceConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub label: String,
    pub options: Vec<ServiceOption>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    pub groups: Vec<ServiceGroup>,
}

const BUILTIN: &[(&str, &[(&str, &str, ServiceType)])] = &[
    (
        "Hypervisors",
        &[
            ("Amazon Web Services (AWS)", "AWS", ServiceType::GenericHypervisorAws),
            ("Google Cloud Platform (GCP)", "GCP", ServiceType::GenericHypervisorGcp),
            ("Microsoft Azure", "Azure", ServiceType::GenericHypervisorAzure),
        ],
    ),
    (
        "Generic",
        &[
            ("GraphQL API", "Generic GraphQL Service", ServiceType::GenericGraphQl),
            ("HTTP/S", "Generic HTTP/S Service", ServiceType::GenericHttp),
            ("Message Queue", "Generic Queue Service", ServiceType::GenericQueue),
            ("NoSQL Database", "Generic NoSQL Service", ServiceType::GenericNoSql),
            ("SQL Database", "Generic SQL Service", ServiceType::GenericDatabase),
            ("Data Warehouse", "Data Warehouse", ServiceType::GenericWarehouse),
        ],
    ),
    (
        "CRM & Marketing",
        &[
            ("Hubspot", "Hubspot", ServiceType::CommonHubspot),
            ("Mailchimp", "Mailchimp", ServiceType::CommonMailchimp),
            ("Salesforce", "Salesforce", ServiceType::CommonSalesforce),
            ("Intercom", "Intercom", ServiceType::CommonIntercom),
        ],
    ),
    (
        "Project Management",
        &[
            ("Asana", "Asana", ServiceType::CommonAsana),
            ("Jira", "Jira", ServiceType::CommonJira),
            ("Slack", "Slack", ServiceType::CommonSlack),
            ("Zendesk", "Zendesk", ServiceType::CommonZendesk),
            ("Trello", "Trello", ServiceType::CommonTrello),
            ("ClickUp", "ClickUp", ServiceType::CommonClickup),
            ("Notion", "Notion", ServiceType::CommonNotion),
            ("Miro", "Miro", ServiceType::CommonMiro),
        ],
    ),
    (
        "Development & DevOps",
        &[
            ("GitHub", "GitHub", ServiceType::CommonGithub),
            ("GitLab", "GitLab", ServiceType::CommonGitlab),
            ("Vercel", "Vercel", ServiceType::CommonVercel),
            ("Zapier", "Zapier", ServiceType::CommonZapier),
            ("CircleCI", "CircleCI", ServiceType::CommonCircleci),
            ("Jenkins", "Jenkins", ServiceType::CommonJenkins),
            ("Docker Hub", "Docker Hub", ServiceType::CommonDocker),
        ],
    ),
    (
        "Identity",
        &[
            ("Auth0", "Auth0", ServiceType::CommonAuth0),
            ("Okta", "Okta", ServiceType::CommonOkta),
        ],
    ),
    (
        "Payments",
        &[
            ("Stripe", "Stripe", ServiceType::CommonStripe),
            ("Twilio", "Twilio", ServiceType::CommonTwilio),
            ("PayPal", "PayPal", ServiceType::CommonPaypal),
        ],
    ),
];

impl ServiceCatalog {
    /// The stock catalog, grouped by category.
    pub fn builtin() -> Self {
        let groups = BUILTIN
            .iter()
            .map(|(group, options)| ServiceGroup {
                label: group.to_string(),
                options: options
                    .iter()
                    .map(|(label, identifier, service_type)| ServiceOption {
                        label: label.to_string(),
                        status: None,
                        configuration: default_configuration(service_type.clone(), identifier),
                    })
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    /// Reads a host-supplied catalog: a JSON list of groups.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn options(&self) -> impl Iterator<Item = &ServiceOption> {
        self.groups.iter().flat_map(|g| g.options.iter())
    }

    /// Looks an option up by its menu label.
    pub fn find(&self, label: &str) -> Option<&ServiceOption> {
        self.options().find(|o| o.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.options.is_empty())
    }
}

fn default_configuration(service_type: ServiceType, identifier: &str) -> ServiceConfiguration {
    let configuration = ServiceConfiguration::new(service_type.clone(), identifier);
    match service_type {
        ServiceType::GenericHttp => configuration
            .with_parameter("clientId", ParameterValue::Text(String::new()))
            .with_parameter("clientSecret", ParameterValue::Text(String::new()))
            .with_parameter("hostAddress", ParameterValue::Text("localhost".to_string()))
            .with_parameter("hostPort", ParameterValue::Integer(443))
            .with_parameter("hostSecure", ParameterValue::Bool(true))
            .with_parameter("strict", ParameterValue::Bool(true)),
        _ => configuration,
    }
}
