//! Common test utilities for building graphs and configurations.
use datalayer::config::{ConfigEndpoint, EndpointConfiguration};
use datalayer::prelude::*;

/// A data layer holding a single, unwired flow.
#[allow(dead_code)]
pub fn empty_graph() -> (Graph, Flow) {
    let graph = Graph::from_preset(LayoutPreset::Empty).unwrap();
    let flow = graph.flows()[0].clone();
    (graph, flow)
}

#[allow(dead_code)]
pub fn add_service(graph: &mut Graph, service_type: ServiceType, identifier: &str) -> String {
    graph.add_service(
        ServiceConfiguration::new(service_type, identifier),
        Some(identifier.to_string()),
        None,
        Position::new(0.0, 0.0),
    )
}

/// Ids of a fully wired `Hubspot -> Salesforce` pipeline.
#[allow(dead_code)]
pub struct Wired {
    pub graph: Graph,
    pub flow: Flow,
    pub source: String,
    pub destination: String,
}

/// `Hubspot (Success) -> modelize -> egress -> Salesforce`, without the
/// warehouse edge.
#[allow(dead_code)]
pub fn wired_graph() -> Wired {
    let (mut graph, flow) = empty_graph();
    let source = add_service(&mut graph, ServiceType::CommonHubspot, "Hubspot");
    let destination = add_service(&mut graph, ServiceType::CommonSalesforce, "Salesforce");
    graph.set_service_status(&source, Status::Success).unwrap();

    graph.connect(&source, &flow.modelize).unwrap();
    graph.connect(&flow.modelize, &flow.egress).unwrap();
    graph.connect(&flow.egress, &destination).unwrap();

    Wired {
        graph,
        flow,
        source,
        destination,
    }
}

#[allow(dead_code)]
pub fn endpoint(service_type: ServiceType, identifier: &str) -> ConfigEndpoint {
    ConfigEndpoint {
        service_type,
        configuration: EndpointConfiguration {
            identifier: identifier.to_string(),
            parameters: Default::default(),
        },
    }
}

/// A configuration entry named the way the exporter names it.
#[allow(dead_code)]
pub fn config_flow(
    source: (ServiceType, &str),
    destination: (ServiceType, &str),
    warehouse: bool,
    interval: u32,
) -> ConfigFlow {
    ConfigFlow {
        name: format!("{} -> {}", source.1, destination.1),
        warehouse,
        interval,
        source: endpoint(source.0, &datalayer::config::slugify(source.1)),
        destination: endpoint(destination.0, &datalayer::config::slugify(destination.1)),
    }
}
