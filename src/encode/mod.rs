//! Persistence of rendered frames.
//!
//! Sinks consume frames in order; the GIF assembler reads written stills back from disk.

/// Looping GIF assembly from written still images.
pub mod gif;
/// PNG writing for [`FrameRGBA`](crate::render::FrameRGBA).
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
