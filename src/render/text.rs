use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{NetreelError, NetreelResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Raw bytes of the font used for the frame-number overlay.
#[derive(Clone, Debug)]
pub struct LabelFont {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
}

impl LabelFont {
    /// Read a TrueType/OpenType font file.
    ///
    /// A bare file name that does not exist relative to the working directory is also looked up
    /// under the system font directories.
    pub fn load(path: impl AsRef<Path>) -> NetreelResult<Self> {
        let requested = path.as_ref();
        let path = resolve_font_path(requested).ok_or_else(|| {
            NetreelError::resource_unavailable(format!(
                "font '{}' not found",
                requested.display()
            ))
        })?;
        if path.as_path() != requested {
            tracing::debug!(
                font = %requested.display(),
                path = %path.display(),
                "resolved system font"
            );
        }
        let bytes = std::fs::read(&path).map_err(|e| {
            NetreelError::resource_unavailable(format!("read font '{}': {e}", path.display()))
        })?;
        let font = Self::from_bytes(path, bytes);
        // Fail here rather than on the first frame.
        TextLayoutEngine::new(&font)?;
        Ok(font)
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

const MAX_FONT_DIR_DEPTH: usize = 6;

fn resolve_font_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.components().count() != 1 {
        return None;
    }
    find_font_file(path.file_name()?, &system_font_dirs())
}

fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    dirs.extend(
        [
            "/usr/share/fonts",
            "/usr/local/share/fonts",
            "/Library/Fonts",
            "/System/Library/Fonts",
        ]
        .map(PathBuf::from),
    );
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    dirs
}

/// First file called `name` under `dirs`, searched breadth-first per directory.
fn find_font_file(name: &OsStr, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .find_map(|dir| search_dir(dir, name, MAX_FONT_DIR_DEPTH))
}

fn search_dir(dir: &Path, name: &OsStr, depth: usize) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(t) if t.is_dir() => subdirs.push(path),
            Ok(_) if path.file_name() == Some(name) => return Some(path),
            _ => {}
        }
    }
    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|sub| search_dir(sub, name, depth - 1))
}

/// Parley contexts with a single registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &LabelFont) -> NetreelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            NetreelError::resource_unavailable(format!(
                "no font families found in '{}'",
                font.path().display()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                NetreelError::resource_unavailable(format!(
                    "font '{}' has no family name",
                    font.path().display()
                ))
            })?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> NetreelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(NetreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_name.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
