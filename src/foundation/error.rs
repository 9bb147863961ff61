/// Convenience result alias used across the crate.
pub type NetreelResult<T> = Result<T, NetreelError>;

/// Coarse classification of a [`NetreelError`], stable across message changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed weights, shapes, or magnitude sequences.
    InvalidInput,
    /// Configuration rejected at construction.
    Validation,
    /// A font or a previously written still image could not be loaded.
    ResourceUnavailable,
    /// A still image or the animation could not be written.
    IoFailure,
    /// Rasterizer-internal failure.
    Render,
    /// Anything else.
    Other,
}

#[derive(thiserror::Error, Debug)]
pub enum NetreelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("io failure: {0}")]
    Io(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("frame {index}: {source}")]
    Frame {
        index: u64,
        #[source]
        source: Box<NetreelError>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NetreelError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Attach a frame index. Already-wrapped errors are returned unchanged.
    pub fn in_frame(self, index: u64) -> Self {
        match self {
            Self::Frame { .. } => self,
            other => Self::Frame {
                index,
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ResourceUnavailable(_) => ErrorKind::ResourceUnavailable,
            Self::Io(_) => ErrorKind::IoFailure,
            Self::Render(_) => ErrorKind::Render,
            Self::Frame { source, .. } => source.kind(),
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Frame index the failure happened on, if known.
    pub fn frame_index(&self) -> Option<u64> {
        match self {
            Self::Frame { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
