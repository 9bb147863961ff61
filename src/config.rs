//! Strongly typed rendering options.
//!
//! `RenderConfig` deserializes from a flat JSON object using the option names below; every key is
//! optional and falls back to its default.
//!
//! | key | default |
//! |---|---|
//! | `margin` | `200` |
//! | `size` | `[1920, 1080]` |
//! | `node_size` | `90` |
//! | `node_gap` | `40` |
//! | `background_rgba` | `[32, 32, 32, 0]` |
//! | `node_rgb` | `[248, 167, 3]` |
//! | `node_stroke` | `5` |
//! | `conn_rgb` | `[81, 181, 237]` |
//! | `conn_max_width` | `20` |
//! | `frame_numbers` | `false` |
//! | `frame_numbers_title` | `"epoch"` |
//! | `frame_numbers_font` | `"OpenSans-Regular.ttf"` |
//! | `frame_numbers_size` | `50` |
//! | `frame_numbers_xy` | `[100, 100]` |
//! | `frame_numbers_rgb` | `[50, 50, 50]` |
//! | `gif` | `false` |
//! | `gif_name` | `"animation.gif"` |
//! | `fps` | `5` |
//! | `out_dir` | `"."` |
//! | `parallel` | `false` |
//! | `threads` | unset |

use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8, Rgba8};
use crate::foundation::error::{NetreelError, NetreelResult};

/// Geometry inputs to the node layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal margin on both sides of the canvas.
    pub margin: u32,
    /// Canvas width and height.
    pub size: Canvas,
    /// Node diameter.
    pub node_size: u32,
    /// Vertical gap between nodes within a layer.
    pub node_gap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 200,
            size: Canvas {
                width: 1920,
                height: 1080,
            },
            node_size: 90,
            node_gap: 40,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background_rgba: Rgba8,
    pub node_rgb: Rgb8,
    /// Node outline width.
    pub node_stroke: u32,
    pub conn_rgb: Rgb8,
    /// Stroke width given to the strongest connection of each row.
    pub conn_max_width: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_rgba: Rgba8::new(32, 32, 32, 0),
            node_rgb: Rgb8::new(248, 167, 3),
            node_stroke: 5,
            conn_rgb: Rgb8::new(81, 181, 237),
            conn_max_width: 20,
        }
    }
}

/// Optional `"{title}: {frame_index}"` overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameNumbersConfig {
    #[serde(rename = "frame_numbers")]
    pub enabled: bool,
    #[serde(rename = "frame_numbers_title")]
    pub title: String,
    /// Path to a TrueType/OpenType font file.
    #[serde(rename = "frame_numbers_font")]
    pub font: PathBuf,
    #[serde(rename = "frame_numbers_size")]
    pub size: u32,
    /// Top-left corner of the label.
    #[serde(rename = "frame_numbers_xy")]
    pub xy: [i32; 2],
    #[serde(rename = "frame_numbers_rgb")]
    pub rgb: Rgb8,
}

impl Default for FrameNumbersConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "epoch".to_string(),
            font: PathBuf::from("OpenSans-Regular.ttf"),
            size: 50,
            xy: [100, 100],
            rgb: Rgb8::new(50, 50, 50),
        }
    }
}

impl FrameNumbersConfig {
    pub fn label(&self, frame: u64) -> String {
        format!("{}: {}", self.title, frame)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    #[serde(rename = "gif")]
    pub enabled: bool,
    /// Animation file name, resolved against `out_dir`.
    #[serde(rename = "gif_name")]
    pub file_name: PathBuf,
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file_name: PathBuf::from("animation.gif"),
            fps: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(flatten)]
    pub layout: LayoutConfig,
    #[serde(flatten)]
    pub style: StyleConfig,
    #[serde(flatten)]
    pub frame_numbers: FrameNumbersConfig,
    #[serde(flatten)]
    pub animation: AnimationConfig,
    /// Directory receiving `{index}.png` stills and the animation.
    pub out_dir: PathBuf,
    /// Render frames on a worker pool instead of one by one.
    pub parallel: bool,
    /// Worker count for `parallel`; rayon's default when unset.
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            frame_numbers: FrameNumbersConfig::default(),
            animation: AnimationConfig::default(),
            out_dir: PathBuf::from("."),
            parallel: false,
            threads: None,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(s: &str) -> NetreelResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| NetreelError::validation(format!("parse render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> NetreelResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            NetreelError::resource_unavailable(format!(
                "read render config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> NetreelResult<()> {
        let layout = &self.layout;
        layout.size.validate()?;
        if u64::from(layout.margin) * 2 >= u64::from(layout.size.width) {
            return Err(NetreelError::validation(
                "margin must leave horizontal room: 2 * margin < width",
            ));
        }
        if layout.node_size == 0 {
            return Err(NetreelError::validation("node_size must be > 0"));
        }

        if self.frame_numbers.enabled && self.frame_numbers.size == 0 {
            return Err(NetreelError::validation("frame_numbers_size must be > 0"));
        }

        if self.animation.fps == 0 {
            return Err(NetreelError::validation("fps must be > 0"));
        }
        if self.animation.file_name.as_os_str().is_empty() {
            return Err(NetreelError::validation("gif_name must be non-empty"));
        }

        if let Some(0) = self.threads {
            return Err(NetreelError::validation(
                "threads must be >= 1 when set",
            ));
        }
        Ok(())
    }

    pub fn frame_path(&self, frame: u64) -> PathBuf {
        self.out_dir.join(format!("{frame}.png"))
    }

    pub fn animation_path(&self) -> PathBuf {
        self.out_dir.join(&self.animation.file_name)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
