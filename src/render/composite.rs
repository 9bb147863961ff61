//! Premultiplied RGBA8 compositing of whole raster layers.

use crate::foundation::error::{NetreelError, NetreelResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Paste `src` over `dst`, using `src`'s own alpha as the mask.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> NetreelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(NetreelError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// A buffer of `pixels` copies of `px`.
pub fn solid(px: PremulRgba8, pixels: usize) -> Vec<u8> {
    px.repeat(pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
