//! Deterministic node placement.
//!
//! Layer `i` sits at `x = margin + i * column_width` where
//! `column_width = (width - 2 * margin) / (L - 1) - node_size / 2`. Nodes inside a layer are
//! stacked with a pitch of `node_size + node_gap` and the stack is centered vertically.

use crate::config::LayoutConfig;
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{NetreelError, NetreelResult};

/// Placement of one node: its bounding-box top-left corner and diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox {
    pub origin: Point,
    pub diameter: f64,
}

impl NodeBox {
    pub fn center(self) -> Point {
        let r = self.diameter / 2.0;
        self.origin + Vec2::new(r, r)
    }

    pub fn rect(self) -> Rect {
        Rect::from_origin_size(self.origin, (self.diameter, self.diameter))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    margin: f64,
    height: f64,
    node_size: f64,
    pitch: f64,
    column_width: f64,
    layer_count: usize,
}

impl Layout {
    /// Layout for `layer_count` node layers (input layer included). Needs at least two layers.
    pub fn new(cfg: &LayoutConfig, layer_count: usize) -> NetreelResult<Self> {
        if layer_count < 2 {
            return Err(NetreelError::invalid_input(format!(
                "layout needs at least two node layers, got {layer_count}"
            )));
        }

        let margin = f64::from(cfg.margin);
        let node_size = f64::from(cfg.node_size);
        let usable = f64::from(cfg.size.width) - 2.0 * margin;
        let column_width = usable / (layer_count - 1) as f64 - node_size / 2.0;

        Ok(Self {
            margin,
            height: f64::from(cfg.size.height),
            node_size,
            pitch: node_size + f64::from(cfg.node_gap),
            column_width,
            layer_count,
        })
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    pub fn layer_x(&self, layer: usize) -> f64 {
        self.margin + layer as f64 * self.column_width
    }

    /// Top offset of a vertically centered stack of `nodes` nodes.
    pub fn layer_top(&self, nodes: usize) -> f64 {
        let block = nodes as f64 * self.pitch;
        (self.height - block) / 2.0
    }

    pub fn node_box(&self, layer: usize, index: usize, nodes: usize) -> NodeBox {
        NodeBox {
            origin: Point::new(
                self.layer_x(layer),
                self.layer_top(nodes) + index as f64 * self.pitch,
            ),
            diameter: self.node_size,
        }
    }

    pub fn layer_boxes(&self, layer: usize, nodes: usize) -> Vec<NodeBox> {
        (0..nodes).map(|o| self.node_box(layer, o, nodes)).collect()
    }
}

/// The two adjacent layers needed to draw one band of connections.
///
/// Advancing consumes the window and returns the next one; the old `previous` is dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerWindow {
    pub previous: Option<Vec<NodeBox>>,
    pub current: Vec<NodeBox>,
}

impl LayerWindow {
    pub fn first(current: Vec<NodeBox>) -> Self {
        Self {
            previous: None,
            current,
        }
    }

    pub fn advance(self, next: Vec<NodeBox>) -> Self {
        Self {
            previous: Some(self.current),
            current: next,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/layout.rs"]
mod tests;
