//! Tests for configuration export, import and text formats.
mod common;
use common::{Wired, add_service, config_flow, empty_graph, endpoint, wired_graph};
use datalayer::config::{ConfigDocument, slugify};
use datalayer::geometry::{DESTINATION_SERVICE_X, SOURCE_SERVICE_X, absolute_flow_y};
use datalayer::prelude::*;
use proptest::prelude::*;
use serde_json::json;

fn hubspot_to_salesforce() -> (Graph, Vec<ConfigFlow>) {
    let Wired {
        mut graph, flow, ..
    } = wired_graph();
    let warehouse = graph.datalayer().unwrap().warehouse.clone();
    graph.connect(&flow.modelize, &warehouse).unwrap();
    let config = graph.to_config();
    (graph, config)
}

#[test]
fn test_export_wired_flow() {
    let (_, config) = hubspot_to_salesforce();
    let document = serde_json::to_value(ConfigDocument { flows: config }).unwrap();
    assert_eq!(
        document,
        json!({
            "flows": [{
                "name": "Hubspot -> Salesforce",
                "warehouse": true,
                "interval": 15,
                "source": {
                    "type": "COMMON-HUBSPOT",
                    "configuration": { "identifier": "hubspot", "parameters": {} }
                },
                "destination": {
                    "type": "COMMON-SALESFORCE",
                    "configuration": { "identifier": "salesforce", "parameters": {} }
                }
            }]
        })
    );
}

#[test]
fn test_export_skips_partial_flows() {
    let (mut graph, flow) = empty_graph();
    let source = add_service(&mut graph, ServiceType::GenericDatabase, "Orders DB");
    graph.connect(&source, &flow.modelize).unwrap();
    graph.connect(&flow.modelize, &flow.egress).unwrap();
    assert!(graph.to_config().is_empty());
}

#[test]
fn test_export_without_warehouse_and_custom_interval() {
    let Wired {
        mut graph, source, ..
    } = wired_graph();
    graph
        .update_service(&source, |data| data.interval = 60)
        .unwrap();
    let config = graph.to_config();
    assert_eq!(config.len(), 1);
    assert!(!config[0].warehouse);
    assert_eq!(config[0].interval, 60);
}

#[test]
fn test_export_names_fall_back_for_empty_identifiers() {
    let Wired {
        mut graph, source, ..
    } = wired_graph();
    graph
        .update_service(&source, |data| data.configuration.identifier.clear())
        .unwrap();
    let config = graph.to_config();
    assert_eq!(config[0].name, "source -> Salesforce");
    assert_eq!(config[0].source.configuration.identifier, "");
}

#[test]
fn test_import_rebuilds_layout() {
    let (_, config) = hubspot_to_salesforce();
    let graph = Graph::from_config(&config).unwrap();

    assert_eq!(graph.flows().len(), 1);
    assert_eq!(graph.edges().len(), 4);
    let flow = &graph.flows()[0];
    let warehouse = &graph.datalayer().unwrap().warehouse;
    assert!(graph.edge_between(&flow.modelize, &flow.egress).is_some());
    assert!(graph.edge_between(&flow.modelize, warehouse).is_some());

    let services: Vec<&Node> = graph
        .nodes()
        .iter()
        .filter(|n| n.node_type() == NodeType::Service)
        .collect();
    assert_eq!(services.len(), 2);
    let source = services
        .iter()
        .find(|n| n.position.x == SOURCE_SERVICE_X)
        .unwrap();
    let destination = services
        .iter()
        .find(|n| n.position.x == DESTINATION_SERVICE_X)
        .unwrap();
    assert_eq!(source.position.y, absolute_flow_y(0, 1));
    assert_eq!(source.as_service().unwrap().configuration.identifier, "Hubspot");
    assert!(graph.edge_between(&source.id, &flow.modelize).is_some());
    assert!(graph.edge_between(&flow.egress, &destination.id).is_some());

    // Imported sources carry no run status yet.
    assert_eq!(graph.status_of(&flow.egress), Status::Unknown);
    assert_eq!(graph.to_config(), config);
}

#[test]
fn test_import_shares_services() {
    let config = vec![
        config_flow(
            (ServiceType::CommonHubspot, "Hubspot"),
            (ServiceType::CommonSalesforce, "Salesforce"),
            false,
            15,
        ),
        config_flow(
            (ServiceType::CommonHubspot, "Hubspot"),
            (ServiceType::CommonSlack, "Slack"),
            true,
            15,
        ),
    ];
    let graph = Graph::from_config(&config).unwrap();

    let hubspot: Vec<&Node> = graph
        .nodes()
        .iter()
        .filter(|n| {
            n.as_service()
                .is_some_and(|s| s.configuration.service_type == ServiceType::CommonHubspot)
        })
        .collect();
    assert_eq!(hubspot.len(), 1);
    let fan_out = graph
        .edges()
        .iter()
        .filter(|e| e.source == hubspot[0].id)
        .count();
    assert_eq!(fan_out, 2);
    assert_eq!(graph.to_config(), config);
}

#[test]
fn test_import_keeps_unknown_types_and_parameters() {
    let mut flow = config_flow(
        (ServiceType::from("CUSTOM-CRM".to_string()), "Legacy CRM"),
        (ServiceType::GenericHttp, "Webhook"),
        false,
        5,
    );
    flow.destination.configuration.parameters.insert(
        "hostPort".to_string(),
        ParameterValue::Integer(443),
    );
    flow.destination.configuration.parameters.insert(
        "hostSecure".to_string(),
        ParameterValue::Bool(true),
    );

    let graph = Graph::from_config(std::slice::from_ref(&flow)).unwrap();
    let exported = graph.to_config();
    assert_eq!(exported, vec![flow]);
    assert_eq!(exported[0].source.service_type.as_str(), "CUSTOM-CRM");
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        parse_config("   ", ConfigFormat::Json).unwrap_err(),
        ImportError::Empty
    );
    assert!(matches!(
        parse_config("{", ConfigFormat::Json).unwrap_err(),
        ImportError::Parse {
            format: ConfigFormat::Json,
            ..
        }
    ));
    assert!(matches!(
        parse_config("flows: [", ConfigFormat::Yaml).unwrap_err(),
        ImportError::Parse {
            format: ConfigFormat::Yaml,
            ..
        }
    ));
    assert_eq!(
        parse_config(r#"{"pipelines": []}"#, ConfigFormat::Json).unwrap_err(),
        ImportError::MissingFlows
    );
    assert_eq!(
        parse_config(r#"{"flows": 3}"#, ConfigFormat::Json).unwrap_err(),
        ImportError::MissingFlows
    );
    assert_eq!(
        parse_config("42", ConfigFormat::Json).unwrap_err(),
        ImportError::InvalidStructure("a number".to_string())
    );
}

#[test]
fn test_parse_bare_array_and_skips_bad_entries() {
    let text = r#"[
        {
            "name": "Orders -> Warehouse",
            "interval": 12.7,
            "source": { "type": "GENERIC-DB-SQL", "configuration": { "identifier": "orders" } },
            "destination": { "type": "GENERIC-WAREHOUSE", "configuration": { "identifier": "warehouse" } }
        },
        { "name": "broken" }
    ]"#;
    let parsed = parse_config(text, ConfigFormat::Json).unwrap();

    assert_eq!(parsed.flows.len(), 1);
    assert_eq!(parsed.flows[0].interval, 12);
    assert!(!parsed.flows[0].warehouse);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].index, 1);
}

#[test]
fn test_parse_yaml_document() {
    let text = "
flows:
  - name: Stripe -> Slack
    warehouse: true
    interval: -3
    source:
      type: COMMON-STRIPE
      configuration:
        identifier: stripe
    destination:
      type: COMMON-SLACK
      configuration:
        identifier: slack
        parameters:
          channel: payments
";
    let parsed = parse_config(text, ConfigFormat::Yaml).unwrap();
    assert!(parsed.skipped.is_empty());

    let flow = &parsed.flows[0];
    assert_eq!(flow.source.service_type, ServiceType::CommonStripe);
    assert_eq!(flow.interval, 0);
    assert!(flow.warehouse);
    assert_eq!(
        flow.destination.configuration.parameters.get("channel"),
        Some(&ParameterValue::Text("payments".to_string()))
    );
}

#[test]
fn test_render_formats_agree() {
    let (_, config) = hubspot_to_salesforce();
    for format in [ConfigFormat::Json, ConfigFormat::Yaml] {
        let text = render_config(&config, format).unwrap();
        let parsed = parse_config(&text, format).unwrap();
        assert_eq!(parsed.flows, config, "{} round trip", format);
    }
}

#[test]
fn test_format_from_str() {
    assert_eq!("json".parse::<ConfigFormat>(), Ok(ConfigFormat::Json));
    assert_eq!("YML".parse::<ConfigFormat>(), Ok(ConfigFormat::Yaml));
    assert!("toml".parse::<ConfigFormat>().is_err());
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Generic HTTP/S Service"), "generic-http-s-service");
    assert_eq!(slugify("  Hubspot  "), "hubspot");
    assert_eq!(slugify("Docker Hub"), "docker-hub");
    assert_eq!(slugify("--"), "");
}

#[test]
fn test_endpoint_identifier_fallback_without_name() {
    let flow = ConfigFlow {
        name: "nightly sync".to_string(),
        warehouse: false,
        interval: 15,
        source: endpoint(ServiceType::CommonJira, "jira"),
        destination: endpoint(ServiceType::CommonNotion, "notion"),
    };
    let graph = Graph::from_config(&[flow]).unwrap();
    let exported = graph.to_config();
    assert_eq!(exported[0].name, "jira -> notion");
    assert_eq!(exported[0].destination.configuration.identifier, "notion");
}

fn service_type() -> impl Strategy<Value = ServiceType> {
    prop_oneof![
        Just(ServiceType::CommonHubspot),
        Just(ServiceType::CommonSalesforce),
        Just(ServiceType::GenericDatabase),
        Just(ServiceType::GenericHttp),
        Just(ServiceType::from("CUSTOM-TOOL".to_string())),
    ]
}

fn display_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,10}[A-Za-z0-9]"
}

prop_compose! {
    fn flow_entry()(
        source_type in service_type(),
        source in display_name(),
        destination_type in service_type(),
        destination in display_name(),
        warehouse in any::<bool>(),
        interval in 0u32..1000,
    ) -> (ServiceType, String, ServiceType, String, bool, u32) {
        (source_type, source, destination_type, destination, warehouse, interval)
    }
}

proptest! {
    #[test]
    fn prop_export_import_round_trip(entries in prop::collection::vec(flow_entry(), 1..6)) {
        let config: Vec<ConfigFlow> = entries
            .iter()
            .enumerate()
            .map(|(index, (source_type, source, destination_type, destination, warehouse, interval))| {
                // Distinct sources so each flow keeps its own interval.
                let source = format!("{} {}", source, index);
                config_flow(
                    (source_type.clone(), &source),
                    (destination_type.clone(), destination),
                    *warehouse,
                    *interval,
                )
            })
            .collect();

        let graph = Graph::from_config(&config).unwrap();
        prop_assert_eq!(graph.flows().len(), config.len());
        prop_assert_eq!(graph.to_config(), config);
    }
}

fn reexport(config: &[ConfigFlow]) -> Vec<ConfigFlow> {
    Graph::from_config(config).unwrap().to_config()
}

#[test]
fn test_round_trip_keeps_typed_identifiers() {
    for identifier in ["", "Hubspot ", "CRM->EU", "A -> B", "  "] {
        let Wired {
            mut graph, source, ..
        } = wired_graph();
        graph
            .update_service(&source, |data| {
                data.configuration.identifier = identifier.to_string();
            })
            .unwrap();

        let first = graph.to_config();
        assert_eq!(reexport(&first), first, "identifier {:?}", identifier);
    }
}

#[test]
fn test_import_ignores_names_that_disagree_with_identifiers() {
    let flow = ConfigFlow {
        name: "My CRM -> Slack".to_string(),
        warehouse: false,
        interval: 15,
        source: endpoint(ServiceType::CommonHubspot, "crm"),
        destination: endpoint(ServiceType::CommonSlack, "slack"),
    };
    let exported = reexport(&[flow]);
    assert_eq!(exported[0].name, "crm -> slack");
    assert_eq!(exported[0].source.configuration.identifier, "crm");
}

fn typed_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("source".to_string()),
        " {0,2}[A-Za-z0-9]{0,6} {0,2}",
        "[A-Za-z0-9]{0,4} ?-> ?[A-Za-z0-9]{0,4}",
        "[A-Za-z0-9 ]{0,3}-{1,2}>{0,2} {0,2}",
    ]
}

proptest! {
    #[test]
    fn prop_graph_export_survives_reimport(
        source_type in service_type(),
        source in typed_identifier(),
        destination_type in service_type(),
        destination in typed_identifier(),
        warehouse in any::<bool>(),
        interval in 0u32..1000,
    ) {
        let (mut graph, flow) = empty_graph();
        let source_id = add_service(&mut graph, source_type, &source);
        let destination_id = add_service(&mut graph, destination_type, &destination);
        graph.update_service(&source_id, |data| data.interval = interval).unwrap();
        graph.connect(&source_id, &flow.modelize).unwrap();
        graph.connect(&flow.modelize, &flow.egress).unwrap();
        graph.connect(&flow.egress, &destination_id).unwrap();
        if warehouse {
            let warehouse_id = graph.datalayer().unwrap().warehouse.clone();
            graph.connect(&flow.modelize, &warehouse_id).unwrap();
        }

        let first = graph.to_config();
        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(reexport(&first), first);
    }
}
