//! Ordered endpoint fallback for one trigger.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::deliver_image_use_case::DeliverImageUseCase;
use crate::domain::entities::{DeliveryOutcome, MessageChain};
use crate::domain::ports::{FetchSession, ImageFetchPort, OutboundPort};

/// Notice sent when no endpoint produced an image.
pub const RETRIEVAL_FAILED_TEXT: &str = "Image retrieval failed.";

/// Drives an endpoint list until one image is delivered.
#[derive(Clone)]
pub struct AcquireImageUseCase {
    fetcher: Arc<dyn ImageFetchPort>,
    delivery: DeliverImageUseCase,
}

impl AcquireImageUseCase {
    /// Creates new acquisition use case.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, delivery: DeliverImageUseCase) -> Self {
        Self { fetcher, delivery }
    }

    /// Runs one orchestration pass over `apis`.
    ///
    /// Endpoints are tried strictly in order and blank entries are skipped.
    /// The first endpoint whose delivery reports an outcome ends the run. If
    /// none does, a single failure notice is sent.
    pub async fn run(&self, apis: &[String], outbound: &dyn OutboundPort) -> DeliveryOutcome {
        match self.fetcher.open_session() {
            Ok(session) => {
                if let Some(outcome) = self.try_endpoints(session.as_ref(), apis, outbound).await {
                    return outcome;
                }
            }
            Err(e) => warn!(error = %e, "Failed to open fetch session"),
        }

        info!(endpoints = apis.len(), "All endpoints failed");
        if let Err(e) = outbound.send(&MessageChain::plain(RETRIEVAL_FAILED_TEXT)).await {
            warn!(error = %e, "Failed to send retrieval failure notice");
        }
        DeliveryOutcome::AllEndpointsFailed
    }

    async fn try_endpoints(
        &self,
        session: &dyn FetchSession,
        apis: &[String],
        outbound: &dyn OutboundPort,
    ) -> Option<DeliveryOutcome> {
        for (index, endpoint) in apis.iter().enumerate() {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                continue;
            }

            let attempt = match session.resolve(endpoint).await {
                Ok(attempt) => attempt,
                Err(e) => {
                    warn!(index, endpoint, timed_out = e.is_timeout(), error = %e, "Endpoint failed");
                    continue;
                }
            };

            let Some(payload) = attempt.payload else {
                debug!(index, endpoint, "Endpoint produced no image");
                continue;
            };

            debug!(index, endpoint, final_url = %attempt.final_url, size = payload.len(), "Resolved image");

            match self
                .delivery
                .deliver_or_fallback(payload, &attempt.final_url, outbound)
                .await
            {
                Ok(outcome) if outcome.ends_run() => return Some(outcome),
                Ok(outcome) => debug!(index, %outcome, "Delivery did not end the run"),
                Err(e) => warn!(index, endpoint, error = %e, "Delivery errored, trying next endpoint"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::DeliveryPolicy;
    use crate::domain::errors::{FetchError, FetchResult};
    use crate::domain::ports::mocks::{MemoryImageStore, RecordingChannel, ScriptedFetcher};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn apis(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn use_case(fetcher: ScriptedFetcher, store: &Arc<MemoryImageStore>) -> AcquireImageUseCase {
        let delivery = DeliverImageUseCase::new(
            store.clone(),
            DeliveryPolicy {
                retry_delay: Duration::ZERO,
                ..DeliveryPolicy::default()
            },
        );
        AcquireImageUseCase::new(Arc::new(fetcher), delivery)
    }

    #[tokio::test]
    async fn test_stops_at_first_delivering_endpoint() {
        let fetcher = ScriptedFetcher::new()
            .error("https://a.test")
            .hit("https://c.test", "https://cdn.test/c.jpg", b"jpeg-c")
            .hit("https://d.test", "https://cdn.test/d.jpg", b"jpeg-d");
        let stats = fetcher.stats();
        let store = Arc::new(MemoryImageStore::new());
        let channel = RecordingChannel::new();

        let outcome = use_case(fetcher, &store)
            .run(
                &apis(&["https://a.test", "https://b.test", "https://c.test", "https://d.test"]),
                &channel,
            )
            .await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Delivered {
                final_url: "https://cdn.test/c.jpg".to_string()
            }
        );
        assert_eq!(channel.attempts(), 1);
        assert_eq!(
            *stats.resolved.lock(),
            vec!["https://a.test", "https://b.test", "https://c.test"]
        );
        assert_eq!(store.persisted().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_link_ends_run() {
        let fetcher = ScriptedFetcher::new()
            .hit("https://a.test", "https://cdn.test/a.jpg", b"jpeg-a")
            .hit("https://b.test", "https://cdn.test/b.jpg", b"jpeg-b");
        let stats = fetcher.stats();
        let store = Arc::new(MemoryImageStore::new());
        let channel = RecordingChannel::failing_images(usize::MAX);

        let outcome = use_case(fetcher, &store)
            .run(&apis(&["https://a.test", "https://b.test"]), &channel)
            .await;

        assert!(matches!(
            outcome,
            DeliveryOutcome::DeliveredViaFallbackLink { retries: 3, .. }
        ));
        assert_eq!(*stats.resolved.lock(), vec!["https://a.test"]);
        let texts = channel.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains('3'));
        assert!(texts[0].contains("https://cdn.test/a.jpg"));
        assert!(!texts.iter().any(|t| t == RETRIEVAL_FAILED_TEXT));
    }

    #[tokio::test]
    async fn test_blank_list_sends_single_notice() {
        let store = Arc::new(MemoryImageStore::new());
        let channel = RecordingChannel::new();

        let outcome = use_case(ScriptedFetcher::new(), &store)
            .run(&apis(&["", "   "]), &channel)
            .await;

        assert_eq!(outcome, DeliveryOutcome::AllEndpointsFailed);
        assert_eq!(channel.texts(), vec![RETRIEVAL_FAILED_TEXT.to_string()]);
        assert!(store.persisted().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_sends_single_notice() {
        let store = Arc::new(MemoryImageStore::new());
        let channel = RecordingChannel::new();

        let outcome = use_case(ScriptedFetcher::new(), &store)
            .run(&[], &channel)
            .await;

        assert_eq!(outcome, DeliveryOutcome::AllEndpointsFailed);
        assert_eq!(channel.attempts(), 1);
    }

    #[tokio::test]
    async fn test_blank_entries_are_skipped_not_resolved() {
        let fetcher = ScriptedFetcher::new().hit("https://b.test", "https://b.test", b"jpeg");
        let stats = fetcher.stats();
        let store = Arc::new(MemoryImageStore::new());
        let channel = RecordingChannel::new();

        let outcome = use_case(fetcher, &store)
            .run(&apis(&["  ", " https://b.test "]), &channel)
            .await;

        assert!(outcome.is_delivered());
        assert_eq!(*stats.resolved.lock(), vec!["https://b.test"]);
    }

    #[tokio::test]
    async fn test_persist_errors_fall_through_to_notice() {
        let fetcher = ScriptedFetcher::new()
            .hit("https://a.test", "https://a.test", b"jpeg-a")
            .hit("https://b.test", "https://b.test", b"jpeg-b");
        let stats = fetcher.stats();
        let store = Arc::new(MemoryImageStore::failing());
        let channel = RecordingChannel::new();

        let outcome = use_case(fetcher, &store)
            .run(&apis(&["https://a.test", "https://b.test"]), &channel)
            .await;

        assert_eq!(outcome, DeliveryOutcome::AllEndpointsFailed);
        assert_eq!(stats.resolved.lock().len(), 2);
        assert_eq!(channel.texts(), vec![RETRIEVAL_FAILED_TEXT.to_string()]);
    }

    #[tokio::test]
    async fn test_session_is_released_on_every_exit() {
        let fetcher = ScriptedFetcher::new().hit("https://a.test", "https://a.test", b"jpeg");
        let stats = fetcher.stats();
        let store = Arc::new(MemoryImageStore::new());
        let use_case = use_case(fetcher, &store);
        let channel = RecordingChannel::new();

        use_case.run(&apis(&["https://a.test"]), &channel).await;
        use_case.run(&apis(&["https://missing.test"]), &channel).await;

        assert_eq!(stats.opened.load(Ordering::SeqCst), 2);
        assert_eq!(stats.closed.load(Ordering::SeqCst), 2);
    }

    struct UnavailableFetcher;

    impl ImageFetchPort for UnavailableFetcher {
        fn open_session(&self) -> FetchResult<Box<dyn FetchSession>> {
            Err(FetchError::client_build("tls backend unavailable"))
        }
    }

    #[tokio::test]
    async fn test_session_failure_reports_total_failure() {
        let store = Arc::new(MemoryImageStore::new());
        let delivery = DeliverImageUseCase::new(store.clone(), DeliveryPolicy::default());
        let use_case = AcquireImageUseCase::new(Arc::new(UnavailableFetcher), delivery);
        let channel = RecordingChannel::new();

        let outcome = use_case.run(&apis(&["https://a.test"]), &channel).await;

        assert_eq!(outcome, DeliveryOutcome::AllEndpointsFailed);
        assert_eq!(channel.texts(), vec![RETRIEVAL_FAILED_TEXT.to_string()]);
    }
}
