//! Frame sequencing: validation up front, then per-frame compile + rasterize + persist, then the
//! optional animation once every still is on disk.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::compile::{FramePlan, compile_frame};
use crate::config::RenderConfig;
use crate::encode::gif::{GifOpts, assemble_gif};
use crate::encode::sink::{FrameSink, PngDirSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{NetreelError, NetreelResult};
use crate::model::snapshot::{InputDim, NetworkShape, WeightSnapshot, input_node_count};
use crate::render::FrameRGBA;
use crate::render::cpu::CpuRasterizer;
use crate::render::text::LabelFont;

/// Frames handed to the worker pool per batch when rendering in parallel.
const PARALLEL_CHUNK_SIZE: usize = 16;

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_rendered: u64,
    /// Connection lines drawn across all frames.
    pub lines_drawn: u64,
    /// Connections skipped because their scaled width was zero.
    pub lines_skipped: u64,
}

/// Result of [`create_animation`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Still images in frame order.
    pub stills: Vec<PathBuf>,
    /// The animation file, when requested.
    pub animation: Option<PathBuf>,
    pub stats: RenderStats,
}

/// Immutable per-run inputs; shared by reference with parallel workers.
struct FrameSource<'a> {
    frames: &'a [WeightSnapshot],
    input: Vec<f64>,
    cfg: RenderConfig,
    connections_per_frame: u64,
}

impl FrameSource<'_> {
    fn compile(&self, idx: FrameIndex) -> NetreelResult<FramePlan> {
        let snapshot = usize::try_from(idx.0)
            .ok()
            .and_then(|i| self.frames.get(i))
            .ok_or_else(|| {
                NetreelError::invalid_input(format!(
                    "frame {idx} out of range (have {} frames)",
                    self.frames.len()
                ))
            })?;
        compile_frame(idx, snapshot, &self.input, &self.cfg)
    }

    fn render(&self, raster: &mut CpuRasterizer, idx: FrameIndex) -> NetreelResult<RenderedFrame> {
        let plan = self.compile(idx)?;
        let lines = plan.line_count() as u64;
        let frame = raster.render_plan(&plan)?;
        Ok(RenderedFrame { frame, lines })
    }
}

struct RenderedFrame {
    frame: FrameRGBA,
    lines: u64,
}

/// Renders a fixed sequence of weight snapshots.
///
/// Construction validates the configuration, checks that every frame has the same network
/// shape as frame 0, and loads the overlay font when frame numbers are enabled.
pub struct RenderSession<'a> {
    source: FrameSource<'a>,
    shape: NetworkShape,
    font: Option<LabelFont>,
    raster: CpuRasterizer,
}

impl<'a> RenderSession<'a> {
    pub fn new(
        frames: &'a [WeightSnapshot],
        input_size: &[InputDim],
        cfg: &RenderConfig,
    ) -> NetreelResult<Self> {
        cfg.validate()?;

        let Some(first) = frames.first() else {
            return Err(NetreelError::invalid_input("no frames to render"));
        };
        let input_nodes = input_node_count(input_size)?;
        let shape = NetworkShape::from_snapshot(first, input_nodes).map_err(|e| e.in_frame(0))?;
        for (idx, snapshot) in frames.iter().enumerate().skip(1) {
            let other = NetworkShape::from_snapshot(snapshot, input_nodes)
                .map_err(|e| e.in_frame(idx as u64))?;
            if other != shape {
                return Err(NetreelError::invalid_input(format!(
                    "layer sizes {:?} differ from frame 0 ({:?})",
                    other.layer_sizes, shape.layer_sizes
                ))
                .in_frame(idx as u64));
            }
        }

        let font = if cfg.frame_numbers.enabled {
            Some(LabelFont::load(&cfg.frame_numbers.font)?)
        } else {
            None
        };
        let raster = CpuRasterizer::new(font.as_ref())?;

        let connections_per_frame = shape
            .layer_sizes
            .windows(2)
            .map(|w| (w[0] * w[1]) as u64)
            .sum();

        Ok(Self {
            source: FrameSource {
                frames,
                input: vec![0.0; input_nodes],
                cfg: cfg.clone(),
                connections_per_frame,
            },
            shape,
            font,
            raster,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.source.frames.len() as u64
    }

    /// Layer sizes shared by every frame, input layer included.
    pub fn shape(&self) -> &NetworkShape {
        &self.shape
    }

    pub fn config(&self) -> &RenderConfig {
        &self.source.cfg
    }

    /// Draw operations for one frame, without rasterizing.
    pub fn compile_frame(&self, idx: FrameIndex) -> NetreelResult<FramePlan> {
        self.source.compile(idx)
    }

    /// Render one frame into memory.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self, idx: FrameIndex) -> NetreelResult<FrameRGBA> {
        self.source
            .render(&mut self.raster, idx)
            .map(|r| r.frame)
            .map_err(|e| e.in_frame(idx.0))
    }

    /// Render every frame in order into `sink`.
    ///
    /// A failure on frame `k` stops the run; frames before `k` have already been pushed.
    pub fn render_all(&mut self, sink: &mut dyn FrameSink) -> NetreelResult<RenderStats> {
        let canvas = self.source.cfg.layout.size;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            frame_count: self.frame_count(),
        })?;

        let mut stats = RenderStats::default();
        if self.source.cfg.parallel {
            self.render_all_parallel(sink, &mut stats)?;
        } else {
            for f in 0..self.frame_count() {
                let idx = FrameIndex(f);
                tracing::info!(frame = f, "rendering frame");
                let rendered = self
                    .source
                    .render(&mut self.raster, idx)
                    .map_err(|e| e.in_frame(f))?;
                self.push(sink, idx, rendered, &mut stats)?;
            }
        }

        sink.end()?;
        Ok(stats)
    }

    fn render_all_parallel(
        &self,
        sink: &mut dyn FrameSink,
        stats: &mut RenderStats,
    ) -> NetreelResult<()> {
        let pool = build_thread_pool(self.source.cfg.threads)?;
        let indices: Vec<u64> = (0..self.frame_count()).collect();

        for chunk in indices.chunks(PARALLEL_CHUNK_SIZE) {
            let source = &self.source;
            let font = self.font.as_ref();
            let rendered = pool.install(|| {
                chunk
                    .par_iter()
                    .map_init(
                        || CpuRasterizer::new(font),
                        |worker, &f| -> NetreelResult<RenderedFrame> {
                            tracing::info!(frame = f, "rendering frame");
                            let raster = worker.as_mut().map_err(|e| {
                                NetreelError::render(format!("worker rasterizer setup: {e}"))
                            })?;
                            source
                                .render(raster, FrameIndex(f))
                                .map_err(|e| e.in_frame(f))
                        },
                    )
                    .collect::<Vec<_>>()
            });

            // Push in frame order; stop at the first failure.
            for (&f, item) in chunk.iter().zip(rendered) {
                self.push(sink, FrameIndex(f), item?, stats)?;
            }
        }
        Ok(())
    }

    fn push(
        &self,
        sink: &mut dyn FrameSink,
        idx: FrameIndex,
        rendered: RenderedFrame,
        stats: &mut RenderStats,
    ) -> NetreelResult<()> {
        sink.push_frame(idx, &rendered.frame)
            .map_err(|e| e.in_frame(idx.0))?;
        stats.frames_rendered += 1;
        stats.lines_drawn += rendered.lines;
        stats.lines_skipped += self
            .source
            .connections_per_frame
            .saturating_sub(rendered.lines);
        Ok(())
    }
}

/// Render every frame to `{out_dir}/{index}.png` and, when `gif` is set, assemble
/// `{out_dir}/{gif_name}` from the written stills.
///
/// The animation is only attempted after every still was written.
pub fn create_animation(
    frames: &[WeightSnapshot],
    input_size: &[InputDim],
    cfg: &RenderConfig,
) -> NetreelResult<RenderOutcome> {
    let result = run(frames, input_size, cfg);
    if let Err(e) = &result {
        tracing::error!(frame = ?e.frame_index(), kind = ?e.kind(), error = %e, "rendering failed");
    }
    result
}

fn run(
    frames: &[WeightSnapshot],
    input_size: &[InputDim],
    cfg: &RenderConfig,
) -> NetreelResult<RenderOutcome> {
    let mut session = RenderSession::new(frames, input_size, cfg)?;
    tracing::info!(
        frames = session.frame_count(),
        layers = ?session.shape().layer_sizes,
        out_dir = %cfg.out_dir.display(),
        "starting to render frames"
    );

    let mut sink = PngDirSink::new(&cfg.out_dir, cfg.style.background_rgba.rgb());
    let stats = session.render_all(&mut sink)?;
    let stills = sink.into_written();

    let animation = if cfg.animation.enabled {
        let opts = GifOpts {
            out_path: cfg.animation_path(),
            fps: cfg.animation.fps,
        };
        tracing::info!(path = %opts.out_path.display(), "building animation");
        assemble_gif(&stills, &opts)?;
        Some(opts.out_path)
    } else {
        None
    };

    Ok(RenderOutcome {
        stills,
        animation,
        stats,
    })
}

fn build_thread_pool(threads: Option<usize>) -> NetreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(NetreelError::validation(
            "threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder
        .build()
        .map_err(|e| anyhow::Error::new(e).context("failed to build rayon thread pool"))?;
    Ok(pool)
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
