//! Entry point for inbound messages: routing, cooldown, then acquisition.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::acquire_image_use_case::AcquireImageUseCase;
use crate::application::dto::{TriggerRequest, TriggerResponse};
use crate::application::services::SourceRouter;
use crate::domain::entities::{MessageChain, Source};
use crate::domain::ports::OutboundPort;
use crate::domain::services::CooldownTable;

fn cooldown_text(remaining: Duration) -> String {
    format!(
        "Too fast! Please wait {} seconds before trying again.",
        remaining.as_secs()
    )
}

fn no_endpoints_text(source: &str) -> String {
    format!("Source [{source}] has no API endpoints configured.")
}

/// Routes a trigger to its source and runs the image pipeline for it.
#[derive(Clone)]
pub struct HandleTriggerUseCase {
    sources: Arc<[Source]>,
    cooldowns: Arc<CooldownTable>,
    acquire: AcquireImageUseCase,
    outbound: Arc<dyn OutboundPort>,
}

impl HandleTriggerUseCase {
    /// Creates new trigger use case.
    #[must_use]
    pub fn new(
        sources: impl Into<Arc<[Source]>>,
        cooldowns: Arc<CooldownTable>,
        acquire: AcquireImageUseCase,
        outbound: Arc<dyn OutboundPort>,
    ) -> Self {
        Self {
            sources: sources.into(),
            cooldowns,
            acquire,
            outbound,
        }
    }

    /// Handles one inbound message.
    pub async fn execute(&self, request: TriggerRequest) -> TriggerResponse {
        self.execute_at(request, Instant::now()).await
    }

    async fn execute_at(&self, request: TriggerRequest, now: Instant) -> TriggerResponse {
        let Some(source) = SourceRouter::route(&self.sources, &request.text) else {
            debug!("No source matched trigger");
            return TriggerResponse::Ignored;
        };
        let name = source.display_name().to_string();

        if let Err(remaining) = self.cooldowns.try_acquire(&request.user_id, now) {
            debug!(user = %request.user_id, remaining_secs = remaining.as_secs(), "User is cooling down");
            self.notify(&cooldown_text(remaining)).await;
            return TriggerResponse::CoolingDown { remaining };
        }

        if !source.has_endpoints() {
            warn!(source = %name, "Matched source has no endpoints");
            self.notify(&no_endpoints_text(&name)).await;
            return TriggerResponse::NoEndpoints { source: name };
        }

        info!(source = %name, user = %request.user_id, "Acquiring image");
        let outcome = self.acquire.run(&source.apis, self.outbound.as_ref()).await;
        info!(source = %name, %outcome, "Trigger completed");
        TriggerResponse::Completed(outcome)
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.outbound.send(&MessageChain::plain(text)).await {
            warn!(error = %e, "Failed to send notice");
        }
    }
}
