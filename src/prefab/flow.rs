use serde::{Deserialize, Serialize};

use super::id::IdGenerator;
use crate::geometry::{EGRESS_OFFSET_X, FLOW_CONTAINER_HEIGHT, FLOW_WIDTH};
use crate::model::{ContainerData, Node, NodeKind, Position, Stage, StageData, Status};

/// Ids of the three nodes that make up one flow.
///
/// The flow owns the lifetime of all three: they are added and removed
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flow {
    pub container: String,
    pub modelize: String,
    pub egress: String,
}

impl Flow {
    pub fn owns(&self, node_id: &str) -> bool {
        self.container == node_id || self.modelize == node_id || self.egress == node_id
    }

    pub fn node_ids(&self) -> [&str; 3] {
        [&self.container, &self.modelize, &self.egress]
    }
}

/// A freshly built flow, nodes included, ready to be committed to a graph.
#[derive(Debug, Clone)]
pub struct FlowPrefab {
    pub container: Node,
    pub modelize: Node,
    pub egress: Node,
}

impl FlowPrefab {
    pub fn flow(&self) -> Flow {
        Flow {
            container: self.container.id.clone(),
            modelize: self.modelize.id.clone(),
            egress: self.egress.id.clone(),
        }
    }

    pub fn into_nodes(self) -> [Node; 3] {
        [self.container, self.modelize, self.egress]
    }
}

/// Builds a flow container holding a linked modelize/egress pair.
///
/// `seed` only flavours the generated ids; uniqueness comes from `ids`.
pub fn create_flow(
    parent_container_id: &str,
    seed: &str,
    x: f64,
    y: f64,
    ids: &mut IdGenerator,
) -> FlowPrefab {
    let container_id = ids.timed(&format!("flow-container-{}", seed));
    // Both ids are needed up front since each stage points at the other.
    let modelize_id = ids.timed(&format!("flow-modelize-{}", seed));
    let egress_id = ids.timed(&format!("flow-egress-{}", seed));

    let container = Node::new(
        container_id.clone(),
        Position::new(x, y),
        NodeKind::Container(ContainerData {
            label: Some("Flow".to_string()),
            label_size: Some(1),
            ..ContainerData::default()
        }),
    )
    .inside(parent_container_id)
    .with_size(FLOW_WIDTH, FLOW_CONTAINER_HEIGHT)
    .with_z_index(-1);

    let modelize = Node::new(
        modelize_id.clone(),
        Position::new(0.0, 0.0),
        NodeKind::Stage(StageData {
            stage: Stage::Modelize,
            partner_id: egress_id.clone(),
            status: Status::Unknown,
        }),
    )
    .inside(container_id.clone());

    let egress = Node::new(
        egress_id,
        Position::new(EGRESS_OFFSET_X, 0.0),
        NodeKind::Stage(StageData {
            stage: Stage::Egress,
            partner_id: modelize_id,
            status: Status::Unknown,
        }),
    )
    .inside(container_id);

    FlowPrefab {
        container,
        modelize,
        egress,
    }
}
