//! Picrelay - fetch an image for a trigger message and deliver it reliably.
//!
//! A trigger is routed to a configured source, whose endpoints are tried in
//! order until one yields an image. Delivery is retried, and when it keeps
//! failing the original link is sent instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "picrelay";
