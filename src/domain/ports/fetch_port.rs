//! Upstream endpoint fetch ports.

use async_trait::async_trait;

use crate::domain::entities::FetchAttempt;
use crate::domain::errors::FetchResult;

/// Opens fetch sessions. One session serves exactly one orchestration run.
pub trait ImageFetchPort: Send + Sync {
    /// Acquires a session. Its connections are released when it is dropped.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be created.
    fn open_session(&self) -> FetchResult<Box<dyn FetchSession>>;
}

/// Resolves endpoints to image bytes.
#[async_trait]
pub trait FetchSession: Send + Sync {
    /// Resolves one endpoint.
    ///
    /// `Ok` with no payload is a normal miss; `Err` means the endpoint failed
    /// at the network level. Either way the caller moves on.
    async fn resolve(&self, endpoint: &str) -> FetchResult<FetchAttempt>;
}
