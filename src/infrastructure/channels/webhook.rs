//! Channel that POSTs messages to a webhook.
//!
//! Image parts are uploaded as `multipart/form-data` under the `file` field.
//! Plain parts are sent as JSON `{"content": "..."}`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{MessageChain, MessagePart};
use crate::domain::errors::DeliveryError;
use crate::domain::ports::OutboundPort;

#[derive(Serialize)]
struct TextPayload<'a> {
    content: &'a str,
}

/// Webhook-backed outbound channel.
pub struct WebhookChannel {
    client: Client,
    url: String,
}

impl WebhookChannel {
    /// Creates a channel posting to `url`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn post_image(&self, path: &Path) -> Result<(), DeliveryError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let request = self.client.post(&self.url).multipart(form);
        self.dispatch(request).await
    }

    async fn post_text(&self, text: &str) -> Result<(), DeliveryError> {
        let request = self
            .client
            .post(&self.url)
            .json(&TextPayload { content: text });
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<(), DeliveryError> {
        let response = request
            .send()
            .await
            .map_err(|e| DeliveryError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::rejected(format!("webhook returned {status}")));
        }
        debug!(%status, "Webhook accepted message");
        Ok(())
    }
}

#[async_trait]
impl OutboundPort for WebhookChannel {
    async fn send(&self, chain: &MessageChain) -> Result<(), DeliveryError> {
        for part in chain.parts() {
            match part {
                MessagePart::Image { path } => self.post_image(path).await?,
                MessagePart::Plain { text } => self.post_text(text).await?,
            }
        }
        Ok(())
    }
}
