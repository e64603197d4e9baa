// THEORY:
// Every failure the engine can surface lives in one enum. The two that matter to
// a run are the scoped ones: a `Load` failure ends the whole run before any face
// work starts, an `Encode` failure belongs to exactly one face and is carried
// back inside that face's report instead of unwinding through the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CubemapError {
    /// The source panorama could not be opened or decoded.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A face could not be encoded or written to disk.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raw pixel vector did not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// A worker task panicked or was cancelled before returning.
    #[error("worker task failed: {0}")]
    Worker(String),
}
