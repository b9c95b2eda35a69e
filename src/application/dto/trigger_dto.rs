//! Trigger DTOs.

use std::time::Duration;

use crate::domain::entities::DeliveryOutcome;

/// An inbound message that may ask for an image.
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    /// Raw message text.
    pub text: String,
    /// Sender identity, used for cooldowns.
    pub user_id: String,
}

impl TriggerRequest {
    /// Creates new trigger request.
    #[must_use]
    pub fn new(text: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id: user_id.into(),
        }
    }
}

/// What happened to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResponse {
    /// No source matched; nothing was sent.
    Ignored,
    /// The user triggered too recently.
    CoolingDown {
        /// Time left before the next trigger is accepted.
        remaining: Duration,
    },
    /// The matched source has no endpoints.
    NoEndpoints {
        /// Display name of the source.
        source: String,
    },
    /// The pipeline ran to completion.
    Completed(DeliveryOutcome),
}
