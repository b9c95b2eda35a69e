//! Persist-and-deliver step with bounded retries and a direct-link fallback.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::application::services::{CompressionConfig, ImageNormalizer};
use crate::domain::entities::{DeliveryOutcome, ImageFormat, MessageChain, PersistedImage};
use crate::domain::errors::DeliveryError;
use crate::domain::ports::{ImageStorePort, OutboundPort};

/// Retry and recompression settings for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Additional attempts after the first one.
    pub send_retries: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
    /// Recompression applied before persisting.
    pub compression: CompressionConfig,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            send_retries: 3,
            retry_delay: Duration::from_secs(1),
            compression: CompressionConfig::default(),
        }
    }
}

/// Text sent in place of the image once every attempt has failed.
#[must_use]
pub fn fallback_link_text(retries: u32, final_url: &str) -> String {
    format!("⚠️ Delivery failed (retried {retries} times), original image link:\n{final_url}")
}

/// Delivers resolved image bytes, falling back to the raw link.
#[derive(Clone)]
pub struct DeliverImageUseCase {
    store: Arc<dyn ImageStorePort>,
    policy: DeliveryPolicy,
}

impl DeliverImageUseCase {
    /// Creates new delivery use case.
    #[must_use]
    pub fn new(store: Arc<dyn ImageStorePort>, policy: DeliveryPolicy) -> Self {
        Self { store, policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Persists the image and tries to deliver it up to `send_retries + 1` times.
    ///
    /// On exhaustion the raw `final_url` is sent as text instead. Cleanup of
    /// the persisted file is scheduled whatever happens after it was written.
    ///
    /// # Errors
    /// Returns error if the image cannot be persisted or the fallback text
    /// itself cannot be sent; no outcome was reported to the user then.
    pub async fn deliver_or_fallback(
        &self,
        image: Bytes,
        final_url: &str,
        outbound: &dyn OutboundPort,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        let image = self.normalize(image).await;
        let format = ImageFormat::sniff(&image);

        let persisted = self.store.persist(&image, format).await?;
        debug!(path = %persisted.path().display(), %format, "Persisted image for delivery");

        let result = self.send_with_retries(&persisted, final_url, outbound).await;
        self.store.schedule_cleanup(&persisted);
        result
    }

    async fn normalize(&self, image: Bytes) -> Bytes {
        let config = self.policy.compression;
        if !config.applies_to(image.len()) {
            return image;
        }

        let original = image.clone();
        match tokio::task::spawn_blocking(move || ImageNormalizer::compress(image, &config)).await
        {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(error = %e, "Recompression task panicked, keeping original");
                original
            }
        }
    }

    async fn send_with_retries(
        &self,
        persisted: &PersistedImage,
        final_url: &str,
        outbound: &dyn OutboundPort,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        let retries = self.policy.send_retries;
        let chain = MessageChain::image(persisted.path());

        for attempt in 0..=retries {
            match outbound.send(&chain).await {
                Ok(()) => {
                    info!(attempt, url = %final_url, "Image delivered");
                    return Ok(DeliveryOutcome::Delivered {
                        final_url: final_url.to_string(),
                    });
                }
                Err(e) => {
                    warn!(attempt, max_retries = retries, error = %e, "Image delivery failed");
                    if attempt < retries {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }

        info!(url = %final_url, "Delivery exhausted, sending direct link");
        outbound
            .send(&MessageChain::plain(fallback_link_text(retries, final_url)))
            .await?;

        Ok(DeliveryOutcome::DeliveredViaFallbackLink {
            final_url: final_url.to_string(),
            retries,
        })
    }
}
