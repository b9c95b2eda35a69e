//! Endpoint fetch error types.

use thiserror::Error;

/// Result type for endpoint fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failures that abort a single endpoint. None of them end the run.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("failed to create HTTP client: {message}")]
    ClientBuild { message: String },
}

impl FetchError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates client build error.
    #[must_use]
    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }

    /// Returns whether the request ran into its deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        assert!(FetchError::timeout("https://a.test").is_timeout());
        assert!(!FetchError::network("reset").is_timeout());
    }

    #[test]
    fn test_display_includes_context() {
        assert_eq!(
            FetchError::timeout("https://a.test/img").to_string(),
            "request timed out: https://a.test/img"
        );
    }
}
