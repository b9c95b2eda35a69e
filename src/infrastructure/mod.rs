//! Infrastructure layer with external service adapters.

/// Outbound channel adapters.
pub mod channels;
/// Application configuration.
pub mod config;
/// Upstream endpoint access.
pub mod http;
/// Transient image files.
pub mod storage;

pub use channels::{ConsoleChannel, WebhookChannel};
pub use config::{AppConfig, ChannelKind, CliArgs, LogLevel, StorageManager};
pub use http::{FetcherConfig, HttpEndpointFetcher};
pub use storage::TransientImageStore;
