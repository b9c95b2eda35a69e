//! Per-endpoint fetch state.

use bytes::Bytes;

/// Result of resolving one endpoint within one run.
///
/// `final_url` starts as the endpoint itself and moves along redirects,
/// JSON envelopes and plain-text indirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    /// Endpoint as configured.
    pub endpoint: String,
    /// URL actually describing the image.
    pub final_url: String,
    /// Resolved payload, absent on a miss.
    pub payload: Option<Bytes>,
}

impl FetchAttempt {
    /// Starts an attempt for the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            final_url: endpoint.clone(),
            endpoint,
            payload: None,
        }
    }

    /// Records the URL the image was ultimately served from.
    #[must_use]
    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = url.into();
        self
    }

    /// Attaches the payload. Empty bodies are treated as a miss.
    #[must_use]
    pub fn with_payload(mut self, payload: Bytes) -> Self {
        self.payload = (!payload.is_empty()).then_some(payload);
        self
    }

    /// Returns true if no image bytes were produced.
    #[must_use]
    pub const fn is_miss(&self) -> bool {
        self.payload.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attempt_is_miss() {
        let attempt = FetchAttempt::new("https://a.test");
        assert!(attempt.is_miss());
        assert_eq!(attempt.final_url, "https://a.test");
    }

    #[test]
    fn test_empty_payload_is_miss() {
        let attempt = FetchAttempt::new("https://a.test").with_payload(Bytes::new());
        assert!(attempt.is_miss());
    }
}
