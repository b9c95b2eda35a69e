//! Domain layer with core entities, services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Stateful domain services.
pub mod services;

pub use entities::{DeliveryOutcome, MessageChain, Source};
pub use errors::{DeliveryError, FetchError, StoreError};
pub use ports::{ImageFetchPort, ImageStorePort, OutboundPort};
