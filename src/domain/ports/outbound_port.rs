//! Outbound message channel port.

use async_trait::async_trait;

use crate::domain::entities::MessageChain;
use crate::domain::errors::DeliveryError;

/// Port for delivering messages to the requesting user.
///
/// Sends are not idempotent: a failure reported after the platform already
/// accepted the message leads to a duplicate on retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutboundPort: Send + Sync {
    /// Sends one message.
    async fn send(&self, chain: &MessageChain) -> Result<(), DeliveryError>;
}
