use tracing::{debug, info};

use super::slug::slugify;
use super::types::{ConfigEndpoint, ConfigFlow, EndpointConfiguration};
use crate::model::{Edge, Node, ServiceData};
use crate::prefab::Flow;

/// Translates the connected flows of a graph into pipeline configuration.
///
/// A flow is exported only when both a source service feeds its modelize
/// stage and its egress stage feeds a destination service. Partial flows
/// are skipped silently; they are work in progress, not errors.
pub fn to_config(flows: &[Flow], nodes: &[Node], edges: &[Edge]) -> Vec<ConfigFlow> {
    let find_node = |id: &str| nodes.iter().find(|n| n.id == id);

    let exported: Vec<ConfigFlow> = flows
        .iter()
        .filter_map(|flow| {
            let source = edges
                .iter()
                .find(|e| e.target == flow.modelize)
                .and_then(|e| find_node(&e.source))
                .and_then(Node::as_service);
            let destination = edges
                .iter()
                .find(|e| e.source == flow.egress)
                .and_then(|e| find_node(&e.target))
                .and_then(Node::as_service);

            let (Some(source), Some(destination)) = (source, destination) else {
                debug!(flow = %flow.container, "skipping partially connected flow");
                return None;
            };

            let warehouse = edges.iter().any(|e| {
                e.source == flow.modelize && find_node(&e.target).is_some_and(Node::is_warehouse)
            });

            Some(ConfigFlow {
                name: format!(
                    "{} -> {}",
                    display_identifier(source, "source"),
                    display_identifier(destination, "destination")
                ),
                warehouse,
                interval: source.interval,
                source: endpoint(source),
                destination: endpoint(destination),
            })
        })
        .collect();

    info!(
        flows = flows.len(),
        exported = exported.len(),
        "configuration exported"
    );
    exported
}

fn display_identifier<'a>(service: &'a ServiceData, fallback: &'a str) -> &'a str {
    let identifier = service.configuration.identifier.as_str();
    if identifier.is_empty() {
        fallback
    } else {
        identifier
    }
}

fn endpoint(service: &ServiceData) -> ConfigEndpoint {
    ConfigEndpoint {
        service_type: service.configuration.service_type.clone(),
        configuration: EndpointConfiguration {
            identifier: slugify(&service.configuration.identifier),
            parameters: service.configuration.parameters.clone(),
        },
    }
}
