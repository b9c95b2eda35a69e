//! Terminal result of an orchestration run.

use std::fmt;

/// How a run ended. Produced exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The image was delivered.
    Delivered {
        /// URL the delivered image came from.
        final_url: String,
    },
    /// Delivery was exhausted and the raw link was sent instead.
    DeliveredViaFallbackLink {
        /// Link that was sent.
        final_url: String,
        /// Configured retry count, as reported to the user.
        retries: u32,
    },
    /// No endpoint produced an image.
    AllEndpointsFailed,
}

impl DeliveryOutcome {
    /// Returns true if the image itself reached the channel.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Returns true if the run stops here without trying further endpoints.
    #[must_use]
    pub const fn ends_run(&self) -> bool {
        matches!(
            self,
            Self::Delivered { .. } | Self::DeliveredViaFallbackLink { .. }
        )
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { final_url } => write!(f, "delivered ({final_url})"),
            Self::DeliveredViaFallbackLink { final_url, retries } => {
                write!(f, "fallback link after {retries} retries ({final_url})")
            }
            Self::AllEndpointsFailed => write!(f, "all endpoints failed"),
        }
    }
}
