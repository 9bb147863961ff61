use std::path::Path;

use image::ImageEncoder as _;
use image::codecs::png::PngEncoder;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{NetreelError, NetreelResult};
use crate::foundation::math::unpremul_rgba8;
use crate::render::FrameRGBA;

/// Convert to straight-alpha RGBA8. Fully transparent pixels take `transparent_rgb`.
pub fn to_straight_rgba8(frame: &FrameRGBA, transparent_rgb: Rgb8) -> NetreelResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(NetreelError::render(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    if !frame.premultiplied {
        return Ok(frame.data.clone());
    }

    let fallback = [transparent_rgb.r, transparent_rgb.g, transparent_rgb.b];
    let mut out = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(4) {
        out.extend_from_slice(&unpremul_rgba8([px[0], px[1], px[2], px[3]], fallback));
    }
    Ok(out)
}

/// Encode `frame` as PNG and write it to `path`.
pub fn write_png(frame: &FrameRGBA, path: &Path, transparent_rgb: Rgb8) -> NetreelResult<()> {
    let straight = to_straight_rgba8(frame, transparent_rgb)?;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            &straight,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| NetreelError::render(format!("encode png '{}': {e}", path.display())))?;
    std::fs::write(path, &buf)
        .map_err(|e| NetreelError::io(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
