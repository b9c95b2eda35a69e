//! Transient image store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while persisting an image for delivery.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StoreError {
    #[error("store directory unavailable: {}", path.display())]
    DirectoryUnavailable { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
