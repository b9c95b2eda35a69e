//! Upstream HTTP access.

pub mod endpoint_fetcher;

pub use endpoint_fetcher::{FetcherConfig, HttpEndpointFetcher};
