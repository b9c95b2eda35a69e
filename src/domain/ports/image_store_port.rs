//! Transient image store port.

use async_trait::async_trait;

use crate::domain::entities::{ImageFormat, PersistedImage};
use crate::domain::errors::StoreError;

/// Port for write-once image files readable by the outbound channel.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Writes bytes under a freshly generated unique name.
    async fn persist(&self, bytes: &[u8], format: ImageFormat)
    -> Result<PersistedImage, StoreError>;

    /// Schedules best-effort deletion after the grace period.
    /// Never blocks the caller and never reports back.
    fn schedule_cleanup(&self, image: &PersistedImage);
}
