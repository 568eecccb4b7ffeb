//! Asset loading errors
//!
//! Callers above the loader degrade to a fallback (empty animation set,
//! solid-color backdrop, synthesized sound) instead of aborting.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sheet config: {0}")]
    InvalidConfig(String),
}
