//! Tests for status propagation through flows.
mod common;
use common::{Wired, add_service, wired_graph};
use datalayer::error::GraphError;
use datalayer::prelude::*;
use datalayer::propagation::resolve_statuses;

#[test]
fn test_source_status_reaches_destination() {
    let Wired {
        graph,
        flow,
        source,
        destination,
    } = wired_graph();

    for id in [&source, &flow.modelize, &flow.egress, &destination] {
        assert_eq!(graph.status_of(id), Status::Success, "node {}", id);
    }
    for edge in graph.edges() {
        assert_eq!(edge.status(), Status::Success);
        assert_eq!(edge.indicator(), EdgeIndicator::Moving);
    }
}

#[test]
fn test_error_status_propagates() {
    let Wired {
        mut graph,
        flow,
        source,
        destination,
    } = wired_graph();

    graph
        .set_service_status(&source, Status::ErrorServicePull)
        .unwrap();

    assert_eq!(graph.status_of(&flow.modelize), Status::ErrorServicePull);
    assert_eq!(graph.status_of(&flow.egress), Status::ErrorServicePull);
    assert_eq!(graph.status_of(&destination), Status::ErrorServicePull);
    let edge = graph.edge_between(&flow.egress, &destination).unwrap();
    assert_eq!(edge.indicator(), EdgeIndicator::Blinking);
}

#[test]
fn test_cutting_the_feed_resets_downstream() {
    let Wired {
        mut graph,
        flow,
        source,
        destination,
    } = wired_graph();

    let edge_id = graph
        .edge_between(&source, &flow.modelize)
        .unwrap()
        .id
        .clone();
    graph.remove_edge(&edge_id).unwrap();

    assert_eq!(graph.status_of(&source), Status::Success);
    assert_eq!(graph.status_of(&flow.modelize), Status::Unknown);
    assert_eq!(graph.status_of(&flow.egress), Status::Unknown);
    assert_eq!(graph.status_of(&destination), Status::Unknown);
    let edge = graph.edge_between(&flow.egress, &destination).unwrap();
    assert_eq!(edge.indicator(), EdgeIndicator::Neutral);
}

#[test]
fn test_derived_status_cannot_be_set() {
    let Wired {
        mut graph,
        destination,
        ..
    } = wired_graph();

    let err = graph
        .set_service_status(&destination, Status::ErrorDataEgress)
        .unwrap_err();
    assert_eq!(err, GraphError::DerivedStatus(destination.clone()));
    assert_eq!(graph.status_of(&destination), Status::Success);
}

#[test]
fn test_status_on_non_service_is_refused() {
    let Wired {
        mut graph, flow, ..
    } = wired_graph();
    let err = graph
        .set_service_status(&flow.modelize, Status::Success)
        .unwrap_err();
    assert_eq!(err, GraphError::NotAService(flow.modelize.clone()));
}

#[test]
fn test_service_to_service_chain() {
    let (mut graph, _) = common::empty_graph();
    let a = add_service(&mut graph, ServiceType::GenericDatabase, "Orders");
    let b = add_service(&mut graph, ServiceType::GenericQueue, "Queue");
    graph
        .set_service_status(&a, Status::SuccessNothingNew)
        .unwrap();
    graph.connect(&a, &b).unwrap();

    assert_eq!(graph.status_of(&b), Status::SuccessNothingNew);
}

#[test]
fn test_warehouse_edge_mirrors_modelize() {
    let Wired {
        mut graph,
        flow,
        source,
        ..
    } = wired_graph();
    let warehouse = graph.datalayer().unwrap().warehouse.clone();
    let edge = graph.connect(&flow.modelize, &warehouse).unwrap();
    assert_eq!(edge.status(), Status::Success);

    graph
        .set_service_status(&source, Status::ErrorDataModelize)
        .unwrap();
    let edge = graph.edge_between(&flow.modelize, &warehouse).unwrap();
    assert_eq!(edge.status(), Status::ErrorDataModelize);
    // The warehouse itself never carries a status.
    assert_eq!(graph.status_of(&warehouse), Status::Unknown);
}

#[test]
fn test_unconnected_stages_are_unknown() {
    let (graph, flow) = common::empty_graph();
    assert_eq!(graph.status_of(&flow.modelize), Status::Unknown);
    assert_eq!(graph.status_of(&flow.egress), Status::Unknown);
}

#[test]
fn test_resolve_statuses_is_pure() {
    let Wired {
        graph,
        flow,
        source,
        ..
    } = wired_graph();

    let mut nodes = graph.nodes().to_vec();
    for node in nodes.iter_mut() {
        if node.id == source {
            node.as_service_mut().unwrap().status = Some(Status::ErrorServicePush);
        }
    }
    let resolved = resolve_statuses(&nodes, graph.edges());

    assert_eq!(
        resolved.get(&flow.egress).copied(),
        Some(Status::ErrorServicePush)
    );
    // Inputs are untouched.
    let egress = nodes.iter().find(|n| n.id == flow.egress).unwrap();
    assert_eq!(egress.status(), Status::Success);
}

#[test]
fn test_updating_a_fed_service_keeps_derived_status() {
    let Wired {
        mut graph,
        destination,
        ..
    } = wired_graph();
    graph
        .update_service(&destination, |data| {
            data.label = Some("CRM".to_string());
            data.set_interval(-5);
        })
        .unwrap();

    let node = graph.node(&destination).unwrap();
    let data = node.as_service().unwrap();
    assert_eq!(data.label.as_deref(), Some("CRM"));
    assert_eq!(data.interval, 0);
    assert_eq!(node.status(), Status::Success);
}
