use ahash::AHashMap;
use tracing::{debug, info};

use super::slug::slugify;
use super::types::{ConfigEndpoint, ConfigFlow};
use crate::geometry::{
    DESTINATION_SERVICE_X, FLOW_X, SOURCE_SERVICE_X, absolute_flow_y, next_flow_y,
};
use crate::layout::Layout;
use crate::model::{
    DEFAULT_INTERVAL, Edge, EdgeShape, Node, NodeKind, Position, ServiceConfiguration, ServiceData,
};
use crate::prefab::{IdGenerator, create_datalayer, create_flow};
use crate::rules::edge_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Source,
    Destination,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Destination => "destination",
        }
    }
}

/// Builds a fresh layout holding one flow per configuration entry.
///
/// Services are shared between entries when they have the same type, role
/// and identifier. Edges are synthesized directly: the configuration is
/// reproduced as written even where the interactive rules would refuse a
/// second connection on a shared service.
pub fn from_config(entries: &[ConfigFlow], ids: &mut IdGenerator) -> Layout {
    LayoutBuilder::new(entries.len(), ids).build(entries)
}

/// Separator the exporter writes between the two identifiers of a name.
const NAME_SEPARATOR: &str = " -> ";

/// Recovers the display identifiers of both endpoints from an exported
/// `"<source> -> <destination>"` name.
///
/// A split is used only when both parts slugify back to the identifiers
/// stored in the configuration, so the name is reproduced exactly on the
/// next export. The exporter writes the role name for an empty identifier;
/// that part maps back to an empty identifier.
fn split_name<'e>(
    name: &'e str,
    source: &ConfigEndpoint,
    destination: &ConfigEndpoint,
) -> Option<(&'e str, &'e str)> {
    fn display<'p>(part: &'p str, endpoint: &ConfigEndpoint, role: Role) -> Option<&'p str> {
        let identifier = endpoint.configuration.identifier.as_str();
        if slugify(part) == identifier {
            Some(part)
        } else if identifier.is_empty() && part == role.as_str() {
            Some("")
        } else {
            None
        }
    }

    // Separators may overlap ("x -> -> y"), so every offset is tried.
    name.char_indices().find_map(|(at, _)| {
        if !name[at..].starts_with(NAME_SEPARATOR) {
            return None;
        }
        let (left, right) = (&name[..at], &name[at + NAME_SEPARATOR.len()..]);
        Some((
            display(left, source, Role::Source)?,
            display(right, destination, Role::Destination)?,
        ))
    })
}

struct LayoutBuilder<'a> {
    ids: &'a mut IdGenerator,
    flow_count: usize,
    layout: Layout,
    datalayer_container: String,
    warehouse: String,
    // "type|role|identifier" -> service node id
    services: AHashMap<String, String>,
    service_nodes: Vec<Node>,
}

impl<'a> LayoutBuilder<'a> {
    fn new(flow_count: usize, ids: &'a mut IdGenerator) -> Self {
        let datalayer = create_datalayer(flow_count, ids);
        let layout = Layout {
            datalayer: Some(datalayer.datalayer()),
            ..Layout::default()
        };
        let datalayer_container = datalayer.container.id.clone();
        let warehouse = datalayer.warehouse.id.clone();
        let mut builder = Self {
            ids,
            flow_count,
            layout,
            datalayer_container,
            warehouse,
            services: AHashMap::new(),
            service_nodes: Vec::new(),
        };
        builder.layout.nodes.extend(datalayer.into_nodes());
        builder
    }

    fn build(mut self, entries: &[ConfigFlow]) -> Layout {
        for (index, entry) in entries.iter().enumerate() {
            self.add_entry(index, entry);
        }
        info!(
            flows = self.layout.flows.len(),
            services = self.service_nodes.len(),
            edges = self.layout.edges.len(),
            "configuration imported"
        );
        self.layout.nodes.append(&mut self.service_nodes);
        self.layout
    }

    fn add_entry(&mut self, index: usize, entry: &ConfigFlow) {
        let prefab = create_flow(
            &self.datalayer_container,
            &(index + 1).to_string(),
            FLOW_X,
            next_flow_y(index),
            &mut *self.ids,
        );
        let flow = prefab.flow();
        self.layout.nodes.extend(prefab.into_nodes());

        let (source_name, destination_name) =
            match split_name(&entry.name, &entry.source, &entry.destination) {
                Some((source, destination)) => (Some(source), Some(destination)),
                None => (None, None),
            };
        let y = absolute_flow_y(index, self.flow_count);
        let source = self.service(
            Role::Source,
            &entry.source,
            source_name,
            entry.interval,
            Position::new(SOURCE_SERVICE_X, y),
        );
        let destination = self.service(
            Role::Destination,
            &entry.destination,
            destination_name,
            DEFAULT_INTERVAL,
            Position::new(DESTINATION_SERVICE_X, y),
        );

        self.link(&source, &flow.modelize, EdgeShape::Circle);
        self.link(&flow.modelize, &flow.egress, EdgeShape::Square);
        self.link(&flow.egress, &destination, EdgeShape::Circle);
        if entry.warehouse {
            let warehouse = self.warehouse.clone();
            self.link(&flow.modelize, &warehouse, EdgeShape::Square);
        }
        debug!(name = %entry.name, flow = %flow.container, "flow rebuilt");
        self.layout.flows.push(flow);
    }

    /// Returns the id of the service for `endpoint`, creating it on first use.
    fn service(
        &mut self,
        role: Role,
        endpoint: &ConfigEndpoint,
        display_name: Option<&str>,
        interval: u32,
        position: Position,
    ) -> String {
        let identifier = display_name
            .map(str::to_string)
            .unwrap_or_else(|| endpoint.configuration.identifier.clone());
        let key = format!(
            "{}|{}|{}",
            endpoint.service_type,
            role.as_str(),
            identifier
        );
        if let Some(existing) = self.services.get(&key) {
            return existing.clone();
        }

        let id = self.ids.timed(&format!("service-{}", role.as_str()));
        let mut data = ServiceData::new(ServiceConfiguration {
            service_type: endpoint.service_type.clone(),
            identifier: identifier.clone(),
            parameters: endpoint.configuration.parameters.clone(),
        });
        data.label = Some(identifier);
        data.interval = interval;
        self.service_nodes
            .push(Node::new(id.clone(), position, NodeKind::Service(data)));
        self.services.insert(key, id.clone());
        id
    }

    fn link(&mut self, source: &str, target: &str, shape: EdgeShape) {
        self.layout
            .edges
            .push(Edge::new(edge_id(source, target), source, target, shape));
    }
}
