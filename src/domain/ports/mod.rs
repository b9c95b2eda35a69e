//! Port definitions (hexagonal architecture boundaries).

mod fetch_port;
mod image_store_port;
mod outbound_port;

pub use fetch_port::{FetchSession, ImageFetchPort};
pub use image_store_port::ImageStorePort;
#[cfg(test)]
pub use outbound_port::MockOutboundPort;
pub use outbound_port::OutboundPort;
