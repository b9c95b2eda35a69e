//! Outbound delivery error types.

use thiserror::Error;

/// Failure reported by the outbound channel for one send.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum DeliveryError {
    #[error("channel rejected message: {message}")]
    ChannelRejected { message: String },

    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to persist image: {0}")]
    Store(#[from] super::StoreError),
}

impl DeliveryError {
    /// Creates channel rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::ChannelRejected {
            message: message.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
