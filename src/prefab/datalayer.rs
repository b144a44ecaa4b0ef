use serde::{Deserialize, Serialize};

use super::id::IdGenerator;
use crate::geometry::{
    DATALAYER_WIDTH, DATALAYER_X, WAREHOUSE_HEIGHT, WAREHOUSE_WIDTH, WAREHOUSE_X,
    data_layer_height, data_layer_y, warehouse_y,
};
use crate::model::{ContainerData, Node, NodeKind, Position, WarehouseData};

pub const DATALAYER_COLOR: &str = "#eaf9f3";
pub const DATALAYER_TEXT_COLOR: &str = "#31c787";

/// Ids of the data layer container and its shared warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datalayer {
    pub container: String,
    pub warehouse: String,
}

#[derive(Debug, Clone)]
pub struct DatalayerPrefab {
    pub container: Node,
    pub warehouse: Node,
}

impl DatalayerPrefab {
    pub fn datalayer(&self) -> Datalayer {
        Datalayer {
            container: self.container.id.clone(),
            warehouse: self.warehouse.id.clone(),
        }
    }

    pub fn into_nodes(self) -> [Node; 2] {
        [self.container, self.warehouse]
    }
}

/// Builds a data layer sized to hold exactly `flow_count` flows plus the
/// warehouse band.
pub fn create_datalayer(flow_count: usize, ids: &mut IdGenerator) -> DatalayerPrefab {
    let height = data_layer_height(flow_count);

    let container = Node::new(
        ids.timed("datalayer"),
        Position::new(DATALAYER_X, data_layer_y(flow_count)),
        NodeKind::Container(ContainerData {
            annotation: Some("Data Layer".to_string()),
            annotation_size: Some(2),
            text_color: Some(DATALAYER_TEXT_COLOR.to_string()),
            color: Some(DATALAYER_COLOR.to_string()),
            ..ContainerData::default()
        }),
    )
    .with_size(DATALAYER_WIDTH, height)
    .with_z_index(-2)
    .fixed();

    let warehouse = Node::new(
        ids.timed("warehouse"),
        Position::new(WAREHOUSE_X, warehouse_y(height)),
        NodeKind::Warehouse(WarehouseData {
            label: Some("Data Layer Warehouse".to_string()),
        }),
    )
    .inside(container.id.clone())
    .with_size(WAREHOUSE_WIDTH, WAREHOUSE_HEIGHT)
    .fixed();

    DatalayerPrefab {
        container,
        warehouse,
    }
}
