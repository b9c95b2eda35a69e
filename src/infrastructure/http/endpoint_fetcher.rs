//! Resolves an endpoint to image bytes across its three response shapes.
//!
//! - `application/json`: the image URL is searched in the body and fetched.
//! - `image/*`: the body is the image.
//! - anything else: a body starting with `http` is taken as the image URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response, header, redirect};
use tracing::{debug, trace};

use crate::application::services::UrlExtractor;
use crate::domain::entities::FetchAttempt;
use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::ports::{FetchSession, ImageFetchPort};

const USER_AGENT: &str = concat!("picrelay/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client settings for endpoint fetches.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Verify upstream TLS certificates.
    pub verify_ssl: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            verify_ssl: false,
        }
    }
}

/// Opens one reqwest client per orchestration run.
#[derive(Debug, Clone, Default)]
pub struct HttpEndpointFetcher {
    config: FetcherConfig,
}

impl HttpEndpointFetcher {
    /// Creates new fetcher.
    #[must_use]
    pub const fn new(config: FetcherConfig) -> Self {
        Self { config }
    }
}

impl ImageFetchPort for HttpEndpointFetcher {
    fn open_session(&self) -> FetchResult<Box<dyn FetchSession>> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.config.timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(!self.config.verify_ssl)
            .build()
            .map_err(|e| FetchError::client_build(e.to_string()))?;

        Ok(Box::new(HttpFetchSession { client }))
    }
}

/// A connection pool scoped to one run, released on drop.
struct HttpFetchSession {
    client: Client,
}

fn map_request_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::timeout(url)
    } else if err.is_connect() {
        FetchError::network(format!("failed to connect to {url}"))
    } else {
        FetchError::network(err.to_string())
    }
}

impl HttpFetchSession {
    /// Sends a GET. The status code is not inspected; only the body and
    /// its content type decide whether an image was produced.
    async fn get(&self, url: &str) -> FetchResult<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_request_error(url, &e))?;

        trace!(url, status = %response.status(), "Upstream responded");
        Ok(response)
    }

    async fn body(url: &str, response: Response) -> FetchResult<Bytes> {
        response
            .bytes()
            .await
            .map_err(|e| map_request_error(url, &e))
    }

    async fn download(&self, url: &str) -> FetchResult<Bytes> {
        debug!(url, "Fetching image from resolved URL");
        let response = self.get(url).await?;
        Self::body(url, response).await
    }
}

#[async_trait]
impl FetchSession for HttpFetchSession {
    async fn resolve(&self, endpoint: &str) -> FetchResult<FetchAttempt> {
        let mut attempt = FetchAttempt::new(endpoint);
        let response = self.get(endpoint).await?;

        let served_from = response.url().as_str();
        if served_from != endpoint {
            attempt = attempt.with_final_url(served_from);
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        debug!(endpoint, content_type = %content_type, "Endpoint responded");

        if content_type.contains("application/json") {
            let body = Self::body(endpoint, response).await?;
            let data = match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(data) => data,
                Err(e) => {
                    debug!(endpoint, error = %e, "Unparsable JSON body");
                    return Ok(attempt);
                }
            };

            let image_url = UrlExtractor::extract(&data);
            if image_url.is_empty() {
                debug!(endpoint, "No image URL in JSON body");
                return Ok(attempt);
            }

            let bytes = self.download(&image_url).await?;
            Ok(attempt.with_final_url(image_url).with_payload(bytes))
        } else if content_type.contains("image") {
            let bytes = Self::body(endpoint, response).await?;
            Ok(attempt.with_payload(bytes))
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| map_request_error(endpoint, &e))?;
            if !text.starts_with("http") {
                debug!(endpoint, "Text body is not a URL");
                return Ok(attempt);
            }

            let image_url = text.trim();
            let bytes = self.download(image_url).await?;
            Ok(attempt.with_final_url(image_url).with_payload(bytes))
        }
    }
}
