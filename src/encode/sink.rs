use std::path::PathBuf;

use crate::foundation::core::{FrameIndex, Rgb8};
use crate::foundation::error::{NetreelError, NetreelResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> NetreelResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> NetreelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> NetreelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> NetreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> NetreelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> NetreelResult<()> {
        Ok(())
    }
}

/// Writes each frame to `{dir}/{index}.png` and records the paths in push order.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    transparent_rgb: Rgb8,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// `transparent_rgb` is stored in the color channels of fully transparent pixels.
    pub fn new(dir: impl Into<PathBuf>, transparent_rgb: Rgb8) -> Self {
        Self {
            dir: dir.into(),
            transparent_rgb,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in frame order.
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> NetreelResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            NetreelError::io(format!(
                "create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> NetreelResult<()> {
        let path = self.dir.join(format!("{idx}.png"));
        crate::encode::png::write_png(frame, &path, self.transparent_rgb)?;
        tracing::debug!(frame = idx.0, path = %path.display(), "wrote still image");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> NetreelResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
