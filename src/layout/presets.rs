use std::fmt;

use super::Layout;
use crate::geometry::{DESTINATION_SERVICE_X, FLOW_X, SOURCE_SERVICE_X, next_flow_y};
use crate::model::{
    AnnotationData, Edge, EdgeShape, Node, NodeKind, Position, ServiceConfiguration, ServiceData,
    ServiceType, Status, TextAlignment,
};
use crate::prefab::{IdGenerator, create_datalayer, create_flow};

/// Prebuilt graphs the host can offer as starting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LayoutPreset {
    /// Two flows, four services and a guided tour; one flow fully wired.
    #[default]
    Default,
    /// A data layer with a single unwired flow.
    Empty,
}

impl LayoutPreset {
    pub fn all() -> [LayoutPreset; 2] {
        [LayoutPreset::Default, LayoutPreset::Empty]
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::Default => "(Default)",
            LayoutPreset::Empty => "(Empty)",
        }
    }

    pub fn build(self, ids: &mut IdGenerator) -> Layout {
        match self {
            LayoutPreset::Default => default_layout(ids),
            LayoutPreset::Empty => empty_layout(ids),
        }
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn empty_layout(ids: &mut IdGenerator) -> Layout {
    // Sized for two flows so the lone flow has room to grow.
    let datalayer = create_datalayer(2, ids);
    let flow = create_flow(&datalayer.container.id, "2", FLOW_X, next_flow_y(0), ids);

    Layout {
        datalayer: Some(datalayer.datalayer()),
        flows: vec![flow.flow()],
        nodes: datalayer
            .into_nodes()
            .into_iter()
            .chain(flow.into_nodes())
            .collect(),
        edges: Vec::new(),
    }
}

fn service(
    ids: &mut IdGenerator,
    prefix: &str,
    label: &str,
    service_type: ServiceType,
    position: Position,
) -> Node {
    let mut data = ServiceData::new(ServiceConfiguration::new(service_type, label));
    data.label = Some(label.to_string());
    data.status = Some(Status::Success);
    Node::new(ids.timed(prefix), position, NodeKind::Service(data))
}

fn annotation(
    ids: &mut IdGenerator,
    prefix: &str,
    text: &str,
    text_alignment: TextAlignment,
    show_arrow: bool,
    position: Position,
) -> Node {
    Node::new(
        ids.timed(prefix),
        position,
        NodeKind::Annotation(AnnotationData {
            text: text.to_string(),
            text_alignment,
            show_arrow,
            is_pinned: false,
        }),
    )
    .fixed()
}

fn pinned(mut node: Node) -> Node {
    if let NodeKind::Annotation(data) = &mut node.kind {
        data.is_pinned = true;
    }
    node
}

fn default_layout(ids: &mut IdGenerator) -> Layout {
    let datalayer = create_datalayer(2, ids);

    let source_1 = service(
        ids,
        "service-source-1",
        "Database",
        ServiceType::GenericDatabase,
        Position::new(SOURCE_SERVICE_X, 48.0),
    );
    let source_2 = service(
        ids,
        "service-source-2",
        "Hubspot",
        ServiceType::CommonHubspot,
        Position::new(SOURCE_SERVICE_X, -48.0),
    );
    let destination_1 = service(
        ids,
        "service-destination-1",
        "Salesforce",
        ServiceType::CommonSalesforce,
        Position::new(DESTINATION_SERVICE_X, 48.0),
    );
    let destination_2 = service(
        ids,
        "service-destination-2",
        "Slack",
        ServiceType::CommonSlack,
        Position::new(DESTINATION_SERVICE_X, -48.0),
    );

    let container_id = datalayer.container.id.clone();
    let flow_1 = create_flow(&container_id, "2", FLOW_X, next_flow_y(0), ids);
    let flow_2 = create_flow(&container_id, "1", FLOW_X, next_flow_y(1), ids);

    let annotations = [
        pinned(annotation(
            ids,
            "annotation-menu-1",
            "Choose preset scenarios",
            TextAlignment::Left,
            true,
            Position::default(),
        )),
        pinned(annotation(
            ids,
            "annotation-menu-2",
            "Add your own services",
            TextAlignment::Right,
            true,
            Position::default(),
        )),
        annotation(
            ids,
            "annotation-1",
            "Sources pull data to a given destination\n(They have a single output)",
            TextAlignment::Right,
            true,
            Position::new(32.0, 56.0),
        )
        .anchored_to(&source_1.id),
        annotation(
            ids,
            "annotation-2",
            "Data is validated, standardized and optionally warehoused",
            TextAlignment::Left,
            true,
            Position::new(-8.0, -32.0),
        )
        .anchored_to(&flow_2.modelize.id),
        annotation(
            ids,
            "annotation-3",
            "Data is pushed to a destination completing a flow",
            TextAlignment::Left,
            true,
            Position::new(-8.0, 56.0),
        )
        .anchored_to(&destination_1.id),
        annotation(
            ids,
            "annotation-flow",
            "Try connecting a flow yourself!",
            TextAlignment::Center,
            false,
            Position::new(-22.0, -32.0),
        )
        .anchored_to(&flow_1.container.id),
    ];

    let edges = vec![
        Edge::new(
            "pull-modelize-1",
            source_1.id.clone(),
            flow_2.modelize.id.clone(),
            EdgeShape::Circle,
        ),
        Edge::new(
            "modelize-egress-1",
            flow_2.modelize.id.clone(),
            flow_2.egress.id.clone(),
            EdgeShape::Square,
        ),
        Edge::new(
            "egress-push-1",
            flow_2.egress.id.clone(),
            destination_1.id.clone(),
            EdgeShape::Circle,
        ),
        Edge::new(
            "warehouse-1",
            flow_2.modelize.id.clone(),
            datalayer.warehouse.id.clone(),
            EdgeShape::Square,
        ),
    ];

    let flows = vec![flow_1.flow(), flow_2.flow()];
    let mut nodes = vec![source_1, source_2, destination_1, destination_2];
    let datalayer_ids = datalayer.datalayer();
    nodes.extend(datalayer.into_nodes());
    nodes.extend(flow_1.into_nodes());
    nodes.extend(flow_2.into_nodes());
    nodes.extend(annotations);

    Layout {
        datalayer: Some(datalayer_ids),
        flows,
        nodes,
        edges,
    }
}
