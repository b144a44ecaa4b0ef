//! The authoritative editor graph.
//!
//! Every logical operation (connect, delete, add or remove a flow, status
//! change) is one method here. Each method validates first, mutates second
//! and then recomputes derived state (geometry, statuses) before returning,
//! so callers only ever observe consistent snapshots.

use std::path::Path;

use ahash::AHashSet;
use itertools::Itertools;
use tracing::{debug, info};

use crate::config::{self, ConfigFlow};
use crate::error::{GraphError, Rejection, SnapshotError};
use crate::geometry::{
    self, FLOW_X, Rect, clip_to_parent, data_layer_height, data_layer_y, next_flow_y, warehouse_y,
};
use crate::layout::{Layout, LayoutPreset};
use crate::model::{
    Edge, Node, NodeKind, NodeType, Position, ServiceConfiguration, ServiceData, Size, Stage,
    Status,
};
use crate::prefab::{Datalayer, Flow, IdGenerator, create_flow};
use crate::propagation;
use crate::rules;

/// Size assumed for nodes the canvas sizes on its own (services, stages).
pub const DEFAULT_NODE_SIZE: Size = Size {
    width: 56.0,
    height: 32.0,
};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    flows: Vec<Flow>,
    datalayer: Option<Datalayer>,
    ids: IdGenerator,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a prebuilt layout after checking its invariants.
    pub fn from_layout(layout: Layout) -> Result<Self, GraphError> {
        let Layout {
            datalayer,
            flows,
            nodes,
            edges,
        } = layout;

        let mut seen = AHashSet::new();
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }
        for node in &nodes {
            check_parent(node, &nodes)?;
        }
        for edge in &edges {
            for end in [&edge.source, &edge.target] {
                if !seen.contains(end.as_str()) {
                    return Err(GraphError::NodeNotFound(end.clone()));
                }
            }
        }
        for flow in &flows {
            check_flow(flow, &nodes)?;
        }
        if let Some(stray) = nodes
            .iter()
            .find(|n| n.as_stage().is_some() && !flows.iter().any(|f| f.owns(&n.id)))
        {
            return Err(GraphError::StageOutsideFlow(stray.id.clone()));
        }
        if let Some(datalayer) = &datalayer {
            for id in [&datalayer.container, &datalayer.warehouse] {
                if !seen.contains(id.as_str()) {
                    return Err(GraphError::NodeNotFound(id.clone()));
                }
            }
        }

        let ids = IdGenerator::starting_at(nodes.len() as u64);
        let mut graph = Self {
            nodes,
            edges,
            flows,
            datalayer,
            ids,
        };
        graph.refresh();
        Ok(graph)
    }

    /// Rebuilds a graph from exported pipeline configuration.
    pub fn from_config(flows: &[ConfigFlow]) -> Result<Self, GraphError> {
        let mut ids = IdGenerator::new();
        let layout = config::from_config(flows, &mut ids);
        let mut graph = Self::from_layout(layout)?;
        graph.ids = ids;
        Ok(graph)
    }

    /// Restores a graph saved with [`Layout::save`].
    pub fn from_snapshot(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(Self::from_layout(Layout::from_file(path)?)?)
    }

    /// Builds one of the prebuilt layouts.
    pub fn from_preset(preset: LayoutPreset) -> Result<Self, GraphError> {
        let mut ids = IdGenerator::new();
        let layout = preset.build(&mut ids);
        let mut graph = Self::from_layout(layout)?;
        graph.ids = ids;
        Ok(graph)
    }

    pub fn to_layout(&self) -> Layout {
        Layout {
            datalayer: self.datalayer.clone(),
            flows: self.flows.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Exports every fully connected flow.
    pub fn to_config(&self) -> Vec<ConfigFlow> {
        config::to_config(&self.flows, &self.nodes, &self.edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn datalayer(&self) -> Option<&Datalayer> {
        self.datalayer.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(source, target))
    }

    /// The flow a node belongs to, if it is one of a flow's three nodes.
    pub fn flow_of(&self, node_id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.owns(node_id))
    }

    /// Displayed status of a node, `Unknown` for missing nodes.
    pub fn status_of(&self, node_id: &str) -> Status {
        self.node(node_id).map_or(Status::Unknown, Node::status)
    }

    /// Adds an arbitrary node, checking id uniqueness and parentage.
    ///
    /// Stages only enter the graph through [`Graph::add_flow`].
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node(&node.id).is_some() {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if node.as_stage().is_some() {
            return Err(GraphError::StageOutsideFlow(node.id));
        }
        check_parent(&node, &self.nodes)?;
        self.nodes.push(node);
        self.refresh();
        Ok(())
    }

    /// Adds an unconnected service node and returns its id.
    pub fn add_service(
        &mut self,
        configuration: ServiceConfiguration,
        label: Option<String>,
        status: Option<Status>,
        position: Position,
    ) -> String {
        let id = self.ids.timed(&format!(
            "service-{}",
            configuration.service_type.as_str().to_lowercase()
        ));
        let mut data = ServiceData::new(configuration);
        data.label = label;
        data.status = status;
        self.nodes
            .push(Node::new(id.clone(), position, NodeKind::Service(data)));
        debug!(node = %id, "service added");
        self.refresh();
        id
    }

    /// Validates and commits a `source -> target` edge.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<Edge, Rejection> {
        let source_node = self
            .node(source)
            .ok_or_else(|| Rejection::UnknownNode(source.to_string()))?;
        let target_node = self
            .node(target)
            .ok_or_else(|| Rejection::UnknownNode(target.to_string()))?;

        let edge = rules::try_connect(source_node, target_node, &self.edges)?;
        debug!(edge = %edge.id, shape = ?edge.data.shape, "connection accepted");
        self.edges.push(edge.clone());
        self.refresh();
        Ok(self.edge(&edge.id).cloned().unwrap_or(edge))
    }

    /// Moves an existing edge to new endpoints.
    ///
    /// The old edge is always taken out. If the new endpoints are accepted
    /// the moved edge keeps its id; if they are rejected the edge stays
    /// removed and the rejection is returned.
    pub fn reconnect(
        &mut self,
        edge_id: &str,
        source: &str,
        target: &str,
    ) -> Result<Edge, GraphError> {
        if self.edge(edge_id).is_none() {
            return Err(GraphError::EdgeNotFound(edge_id.to_string()));
        }

        self.detach_edges(|e| e.id == edge_id);
        let result = self.connect(source, target);
        self.refresh();
        let mut edge = result?;
        if let Some(committed) = self.edges.iter_mut().find(|e| e.id == edge.id) {
            committed.id = edge_id.to_string();
        }
        edge.id = edge_id.to_string();
        Ok(edge)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
        let removed = self.detach_edges(|e| e.id == edge_id);
        let edge = removed
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        self.refresh();
        Ok(edge)
    }

    /// Deletes a node together with everything it owns.
    ///
    /// Deleting any node of a flow removes the whole flow; deleting the data
    /// layer container or its warehouse removes the data layer with all its
    /// flows. Children of removed nodes go with them, as do all edges
    /// touching a removed node. Returns the ids of every removed node.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Vec<String>, GraphError> {
        if self.node(node_id).is_none() {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }

        let mut seeds: Vec<String> = vec![node_id.to_string()];
        let drops_datalayer = self
            .datalayer
            .as_ref()
            .is_some_and(|d| d.container == node_id || d.warehouse == node_id);
        if drops_datalayer {
            if let Some(datalayer) = &self.datalayer {
                seeds.push(datalayer.container.clone());
                seeds.push(datalayer.warehouse.clone());
            }
        }
        if let Some(flow) = self.flow_of(node_id) {
            seeds.extend(flow.node_ids().iter().map(|id| id.to_string()));
        }

        // Children follow their parents, transitively.
        let mut doomed: Vec<String> = seeds.into_iter().unique().collect();
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index].as_str();
            let children: Vec<String> = self
                .nodes
                .iter()
                .filter(|n| n.parent_id.as_deref() == Some(parent))
                .map(|n| n.id.clone())
                .filter(|id| !doomed.contains(id))
                .collect();
            doomed.extend(children);
            index += 1;
        }
        let doomed_set: AHashSet<&str> = doomed.iter().map(String::as_str).collect();

        self.detach_edges(|e| {
            doomed_set.contains(e.source.as_str()) || doomed_set.contains(e.target.as_str())
        });
        self.nodes.retain(|n| !doomed_set.contains(n.id.as_str()));
        let flow_count = self.flows.len();
        self.flows
            .retain(|f| !f.node_ids().iter().any(|id| doomed_set.contains(id)));
        if drops_datalayer {
            self.datalayer = None;
        }
        if self.flows.len() != flow_count {
            self.restack_flows();
        }

        info!(node = %node_id, removed = doomed.len(), "nodes removed");
        self.refresh();
        Ok(doomed)
    }

    /// Appends a new, unconnected flow to the data layer.
    pub fn add_flow(&mut self) -> Result<Flow, GraphError> {
        let container = self
            .datalayer
            .as_ref()
            .map(|d| d.container.clone())
            .ok_or(GraphError::NoDatalayer)?;
        let count = self.flows.len();
        let prefab = create_flow(
            &container,
            &(count + 1).to_string(),
            FLOW_X,
            next_flow_y(count),
            &mut self.ids,
        );
        let flow = prefab.flow();
        self.nodes.extend(prefab.into_nodes());
        self.flows.push(flow.clone());
        info!(flow = %flow.container, flows = self.flows.len(), "flow added");
        self.refresh();
        Ok(flow)
    }

    /// Removes the flow owning `node_id` (any of its three nodes).
    ///
    /// Services attached to the flow survive; only their edges into and out
    /// of the flow's stages are removed.
    pub fn remove_flow(&mut self, node_id: &str) -> Result<Flow, GraphError> {
        let flow = self
            .flow_of(node_id)
            .cloned()
            .ok_or_else(|| GraphError::FlowNotFound(node_id.to_string()))?;
        self.remove_node(&flow.container)?;
        Ok(flow)
    }

    /// Sets the authored status of a source service.
    pub fn set_service_status(&mut self, node_id: &str, status: Status) -> Result<(), GraphError> {
        let fed = self.edges.iter().any(|e| e.target == node_id);
        let node = self
            .node_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let data = node
            .as_service_mut()
            .ok_or_else(|| GraphError::NotAService(node_id.to_string()))?;
        if fed {
            return Err(GraphError::DerivedStatus(node_id.to_string()));
        }
        data.status = Some(status);
        debug!(node = %node_id, %status, "source status set");
        self.refresh();
        Ok(())
    }

    /// Applies a user edit (label, identifier, parameters, interval) to a
    /// service. Derived status is recomputed afterwards.
    pub fn update_service<F>(&mut self, node_id: &str, edit: F) -> Result<(), GraphError>
    where
        F: FnOnce(&mut ServiceData),
    {
        let node = self
            .node_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let data = node
            .as_service_mut()
            .ok_or_else(|| GraphError::NotAService(node_id.to_string()))?;
        edit(data);
        self.refresh();
        Ok(())
    }

    /// Moves a node, keeping parent-bound nodes inside their parent.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<Position, GraphError> {
        let node = self
            .node(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        let parent_size = match (&node.extent, &node.parent_id) {
            (Some(_), Some(parent)) => self.node(parent).and_then(|p| p.size),
            _ => None,
        };
        let clipped = match parent_size {
            Some(parent_size) => {
                clip_to_parent(position, node.size.or(Some(DEFAULT_NODE_SIZE)), parent_size)
            }
            None => position,
        };
        if let Some(node) = self.node_mut(node_id) {
            node.position = clipped;
        }
        Ok(clipped)
    }

    /// Canvas position of a node, resolving parent offsets.
    pub fn absolute_position(&self, node_id: &str) -> Option<Position> {
        let mut node = self.node(node_id)?;
        let mut position = node.position;
        let mut hops = 0;
        while let Some(parent) = node.parent_id.as_deref().and_then(|p| self.node(p)) {
            position.x += parent.position.x;
            position.y += parent.position.y;
            node = parent;
            hops += 1;
            if hops > self.nodes.len() {
                break;
            }
        }
        Some(position)
    }

    /// Bounding box of every node on the canvas.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .filter(|n| n.node_type() != NodeType::Annotation)
            .filter_map(|n| {
                let position = self.absolute_position(&n.id)?;
                Some(Rect::new(position, n.size.unwrap_or(DEFAULT_NODE_SIZE)))
            })
            .reduce(Rect::union)
    }

    /// Removes matching edges and resets services that lost their feed.
    fn detach_edges<P>(&mut self, mut predicate: P) -> Vec<Edge>
    where
        P: FnMut(&Edge) -> bool,
    {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            self.edges.drain(..).partition(|e| predicate(e));
        self.edges = kept;

        for edge in &removed {
            let still_fed = self.edges.iter().any(|e| e.target == edge.target);
            if still_fed {
                continue;
            }
            if let Some(data) = self.node_mut(&edge.target).and_then(Node::as_service_mut) {
                data.status = Some(Status::Unknown);
            }
        }
        removed
    }

    fn restack_flows(&mut self) {
        let containers: Vec<String> = self.flows.iter().map(|f| f.container.clone()).collect();
        for (index, container) in containers.iter().enumerate() {
            if let Some(node) = self.node_mut(container) {
                node.position.y = next_flow_y(index);
            }
        }
    }

    /// Reapplies data layer geometry for the current flow count.
    fn relayout(&mut self) {
        let Some(datalayer) = self.datalayer.clone() else {
            return;
        };
        let count = self.flows.len();
        let height = data_layer_height(count);
        if let Some(container) = self.node_mut(&datalayer.container) {
            container.position.y = data_layer_y(count);
            container.size = Some(Size::new(
                container
                    .size
                    .map_or(geometry::DATALAYER_WIDTH, |s| s.width),
                height,
            ));
        }
        if let Some(warehouse) = self.node_mut(&datalayer.warehouse) {
            warehouse.position.y = warehouse_y(height);
        }
    }

    fn refresh(&mut self) {
        self.relayout();
        let changed = propagation::propagate(&mut self.nodes, &mut self.edges);
        if changed > 0 {
            debug!(changed, "statuses propagated");
        }
    }
}

/// Non-annotation nodes may only live inside containers; annotations may
/// anchor to any node.
fn check_parent(node: &Node, nodes: &[Node]) -> Result<(), GraphError> {
    let Some(parent_id) = &node.parent_id else {
        return Ok(());
    };
    let parent = nodes
        .iter()
        .find(|n| &n.id == parent_id)
        .ok_or_else(|| GraphError::MissingParent {
            node_id: node.id.clone(),
            parent_id: parent_id.clone(),
        })?;
    if node.node_type() == NodeType::Annotation || parent.is_container() {
        Ok(())
    } else {
        Err(GraphError::IllegalParent {
            node_id: node.id.clone(),
            parent_id: parent_id.clone(),
            parent_type: parent.node_type(),
        })
    }
}

fn check_flow(flow: &Flow, nodes: &[Node]) -> Result<(), GraphError> {
    let find = |id: &str| {
        nodes
            .iter()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    };
    find(&flow.container)?;
    for (own, partner, stage) in [
        (&flow.modelize, &flow.egress, Stage::Modelize),
        (&flow.egress, &flow.modelize, Stage::Egress),
    ] {
        let node = find(own)?;
        let linked = node
            .as_stage()
            .is_some_and(|s| s.stage == stage && &s.partner_id == partner);
        if !linked {
            return Err(GraphError::BrokenPartner {
                stage_id: own.clone(),
                partner_id: node
                    .as_stage()
                    .map(|s| s.partner_id.clone())
                    .unwrap_or_default(),
            });
        }
    }
    Ok(())
}
