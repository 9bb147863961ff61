//! Netreel renders the evolving state of a layered network, one still image per recorded
//! frame, and can stitch the stills into a looping GIF.
//!
//! - Describe each frame as a [`WeightSnapshot`] and the model input as [`InputDim`]s
//! - Configure geometry, colors, overlay, and animation with a [`RenderConfig`]
//! - Call [`create_animation`], or drive a [`RenderSession`] into any [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub mod compile;
pub mod config;
pub mod encode;
pub mod layout;
pub mod model;
pub mod render;
pub mod scale;
pub mod session;

pub use crate::compile::{DrawOp, FrameLabel, FramePlan, compile_frame};
pub use crate::config::{
    AnimationConfig, FrameNumbersConfig, LayoutConfig, RenderConfig, StyleConfig,
};
pub use crate::encode::gif::{GifOpts, assemble_gif};
pub use crate::encode::png::write_png;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngDirSink, SinkConfig};
pub use crate::foundation::core::{Canvas, FrameIndex, Point, Rect, Rgb8, Rgba8};
pub use crate::foundation::error::{ErrorKind, NetreelError, NetreelResult};
pub use crate::layout::{LayerWindow, Layout, NodeBox};
pub use crate::model::snapshot::{
    InputDim, LayerValues, NetworkShape, WeightSnapshot, input_node_count,
};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::text::LabelFont;
pub use crate::scale::map_range_int;
pub use crate::session::{RenderOutcome, RenderSession, RenderStats, create_animation};
