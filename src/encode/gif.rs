use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::foundation::error::{NetreelError, NetreelResult};

/// NeuQuant sampling factor; 1 is slowest and best, 30 fastest.
const QUANTIZER_SPEED: i32 = 10;

/// Options for [`assemble_gif`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifOpts {
    pub out_path: PathBuf,
    pub fps: u32,
}

impl GifOpts {
    pub fn validate(&self) -> NetreelResult<()> {
        if self.fps == 0 {
            return Err(NetreelError::validation("gif fps must be non-zero"));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> image::Delay {
        image::Delay::from_numer_denom_ms(1000, self.fps)
    }
}

/// Read back `stills` in order and encode them as one infinitely looping GIF.
///
/// An unreadable still is [`NetreelError::ResourceUnavailable`]; failing to write the animation
/// is [`NetreelError::Io`].
pub fn assemble_gif(stills: &[PathBuf], opts: &GifOpts) -> NetreelResult<()> {
    opts.validate()?;
    if stills.is_empty() {
        return Err(NetreelError::invalid_input(
            "cannot assemble an animation without frames",
        ));
    }

    let mut frames = Vec::with_capacity(stills.len());
    for path in stills {
        frames.push(read_still(path)?);
        tracing::info!(path = %path.display(), "read back still image");
    }

    let bytes = encode_frames(frames, opts)?;
    std::fs::write(&opts.out_path, &bytes).map_err(|e| {
        NetreelError::io(format!(
            "write animation '{}': {e}",
            opts.out_path.display()
        ))
    })?;

    tracing::info!(path = %opts.out_path.display(), "animation saved");
    Ok(())
}

/// Encode in memory so the only fallible write is the final one.
fn encode_frames(frames: Vec<image::RgbaImage>, opts: &GifOpts) -> NetreelResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buf, QUANTIZER_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| NetreelError::render(format!("encode animation header: {e}")))?;

        let delay = opts.frame_delay();
        for img in frames {
            encoder
                .encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| NetreelError::render(format!("encode animation frame: {e}")))?;
        }
    }
    Ok(buf)
}

fn read_still(path: &Path) -> NetreelResult<image::RgbaImage> {
    let img = image::open(path).map_err(|e| {
        NetreelError::resource_unavailable(format!(
            "read back still image '{}': {e}",
            path.display()
        ))
    })?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
