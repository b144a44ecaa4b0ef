//! Layout arithmetic for the data layer.
//!
//! All positions here are derived from the number of flows and are never
//! stored as independent state: whenever the flow count changes the graph
//! recomputes the container and warehouse geometry from these functions.

use crate::model::{Position, Size};

/// Vertical band occupied by one flow inside the data layer.
pub const FLOW_HEIGHT: f64 = 72.0;
pub const FLOW_WIDTH: f64 = 256.0;
pub const FLOW_CONTAINER_HEIGHT: f64 = 32.0;
/// Horizontal offset of a flow inside the data layer.
pub const FLOW_X: f64 = 24.0;
/// Horizontal offset of the egress stage relative to its modelize sibling.
pub const EGRESS_OFFSET_X: f64 = 200.0;

pub const DATALAYER_X: f64 = -48.0;
pub const DATALAYER_WIDTH: f64 = 300.0;
pub const WAREHOUSE_X: f64 = 4.0;
pub const WAREHOUSE_WIDTH: f64 = 292.0;
pub const WAREHOUSE_HEIGHT: f64 = 32.0;

pub const SOURCE_SERVICE_X: f64 = -312.0;
pub const DESTINATION_SERVICE_X: f64 = 296.0;

pub fn data_layer_height(flow_count: usize) -> f64 {
    (flow_count as f64 + 1.0) * FLOW_HEIGHT
}

pub fn data_layer_y(flow_count: usize) -> f64 {
    -16.0 - (24.0 * flow_count as f64 - 1.0)
}

pub fn warehouse_y(data_layer_height: f64) -> f64 {
    data_layer_height - 36.0
}

/// Relative y of the flow stacked after `flow_count` existing flows.
pub fn next_flow_y(flow_count: usize) -> f64 {
    32.0 + flow_count as f64 * FLOW_HEIGHT
}

/// Absolute y of the flow at `index` in a data layer holding `flow_count` flows.
pub fn absolute_flow_y(index: usize, flow_count: usize) -> f64 {
    data_layer_y(flow_count) + next_flow_y(index)
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn union(self, other: Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// Keeps a child of `child_size` inside a parent of `parent_size`.
pub fn clip_to_parent(position: Position, child_size: Option<Size>, parent_size: Size) -> Position {
    let (width, height) = child_size.map_or((0.0, 0.0), |s| (s.width, s.height));
    let max_x = (parent_size.width - width).max(0.0);
    let max_y = (parent_size.height - height).max(0.0);
    Position {
        x: position.x.clamp(0.0, max_x),
        y: position.y.clamp(0.0, max_y),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Pan and zoom applied by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

pub const FIT_PADDING: f64 = 0.1;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;

/// Centers `bounds` in `viewport` with the canvas' default padding.
pub fn fit_view(bounds: Rect, viewport: Viewport) -> Transform {
    let padded_width = bounds.width * (1.0 + 2.0 * FIT_PADDING);
    let padded_height = bounds.height * (1.0 + 2.0 * FIT_PADDING);
    let zoom_x = if padded_width > 0.0 {
        viewport.width / padded_width
    } else {
        MAX_ZOOM
    };
    let zoom_y = if padded_height > 0.0 {
        viewport.height / padded_height
    } else {
        MAX_ZOOM
    };
    let zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

    let center_x = bounds.x + bounds.width / 2.0;
    let center_y = bounds.y + bounds.height / 2.0;
    Transform {
        x: viewport.width / 2.0 - center_x * zoom,
        y: viewport.height / 2.0 - center_y * zoom,
        zoom,
    }
}
