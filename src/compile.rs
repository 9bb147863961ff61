//! Pure frame compilation: weights + configuration in, draw operations out.
//!
//! A [`FramePlan`] holds three op lists, one per raster layer, in back-to-front order:
//! connection lines, opaque node backgrounds that mask lines passing under nodes, and the nodes
//! themselves (plus the optional frame label).

use crate::config::RenderConfig;
use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Rgba8};
use crate::foundation::error::{NetreelError, NetreelResult};
use crate::layout::{LayerWindow, Layout, NodeBox};
use crate::model::snapshot::{NetworkShape, WeightSnapshot};
use crate::scale::map_range_int;

/// Node fill alpha range; the most active node in a layer is fully opaque.
pub const NODE_OPACITY_RANGE: (i64, i64) = (0, 255);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: Rgba8,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Filled ellipse inscribed in `bounds`, optionally outlined inside the same bounds.
    Disc {
        bounds: Rect,
        fill: Rgba8,
        outline: Option<Outline>,
    },
    Line {
        from: Point,
        to: Point,
        width: u32,
        color: Rgba8,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameLabel {
    pub text: String,
    /// Top-left corner of the text box.
    pub origin: Point,
    pub size_px: f32,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub frame: FrameIndex,
    pub canvas: Canvas,
    /// Fill of the connection layer before any line is drawn.
    pub background: Rgba8,
    pub connections: Vec<DrawOp>,
    pub node_backs: Vec<DrawOp>,
    pub nodes: Vec<DrawOp>,
    /// Drawn on the node layer after the nodes.
    pub label: Option<FrameLabel>,
}

impl FramePlan {
    pub fn line_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }
}

/// Compile one frame.
///
/// `input` is the synthetic input layer prepended to the snapshot's node layers.
pub fn compile_frame(
    frame: FrameIndex,
    snapshot: &WeightSnapshot,
    input: &[f64],
    cfg: &RenderConfig,
) -> NetreelResult<FramePlan> {
    let shape = NetworkShape::from_snapshot(snapshot, input.len())?;
    let layout = Layout::new(&cfg.layout, shape.layer_count())?;

    let node_layers: Vec<&[f64]> = std::iter::once(input)
        .chain(snapshot.node_layers())
        .collect();
    let connection_layers: Vec<&[Vec<f64>]> = snapshot.connection_layers().collect();
    if connection_layers.len() + 1 != node_layers.len() {
        return Err(NetreelError::invalid_input(
            "connection layer count must be one less than node layer count",
        ));
    }

    let style = &cfg.style;
    let mut plan = FramePlan {
        frame,
        canvas: cfg.layout.size,
        background: style.background_rgba,
        connections: Vec::new(),
        node_backs: Vec::with_capacity(shape.node_count()),
        nodes: Vec::with_capacity(shape.node_count()),
        label: None,
    };

    node_layers
        .iter()
        .enumerate()
        .try_fold(None::<LayerWindow>, |window, (layer, values)| {
            let boxes = layout.layer_boxes(layer, values.len());
            push_nodes(&mut plan, &boxes, values, cfg)?;

            let window = match window {
                None => LayerWindow::first(boxes),
                Some(w) => w.advance(boxes),
            };
            if let Some(previous) = &window.previous {
                push_connections(
                    &mut plan.connections,
                    previous,
                    &window.current,
                    connection_layers[layer - 1],
                    cfg,
                )?;
            }
            Ok::<_, NetreelError>(Some(window))
        })?;

    let numbers = &cfg.frame_numbers;
    if numbers.enabled {
        plan.label = Some(FrameLabel {
            text: numbers.label(frame.0),
            origin: Point::new(f64::from(numbers.xy[0]), f64::from(numbers.xy[1])),
            size_px: numbers.size as f32,
            color: numbers.rgb.with_alpha(255),
        });
    }

    Ok(plan)
}

fn push_nodes(
    plan: &mut FramePlan,
    boxes: &[NodeBox],
    values: &[f64],
    cfg: &RenderConfig,
) -> NetreelResult<()> {
    let style = &cfg.style;
    let alphas = map_range_int(values, NODE_OPACITY_RANGE)?;
    let outline = (style.node_stroke > 0).then(|| Outline {
        color: style.node_rgb.with_alpha(255),
        width: f64::from(style.node_stroke),
    });

    for (node, alpha) in boxes.iter().zip(alphas) {
        plan.node_backs.push(DrawOp::Disc {
            bounds: node.rect(),
            fill: style.background_rgba.opaque(),
            outline: None,
        });
        plan.nodes.push(DrawOp::Disc {
            bounds: node.rect(),
            fill: style.node_rgb.with_alpha(alpha.clamp(0, 255) as u8),
            outline,
        });
    }
    Ok(())
}

/// One line per (previous, current) pair; each previous node's row is scaled on its own and
/// zero-width entries are skipped.
fn push_connections(
    out: &mut Vec<DrawOp>,
    previous: &[NodeBox],
    current: &[NodeBox],
    matrix: &[Vec<f64>],
    cfg: &RenderConfig,
) -> NetreelResult<()> {
    let style = &cfg.style;
    let width_range = (0, i64::from(style.conn_max_width));
    let color = style.conn_rgb.with_alpha(255);

    for (from, row) in previous.iter().zip(matrix) {
        let widths = map_range_int(row, width_range)?;
        for (to, width) in current.iter().zip(widths) {
            if width <= 0 {
                continue;
            }
            out.push(DrawOp::Line {
                from: from.center(),
                to: to.center(),
                width: width as u32,
                color,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/compile.rs"]
mod tests;
