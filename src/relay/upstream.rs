//! Outbound transport to the automation webhooks.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use wreq::Client;
use wreq::header::CONTENT_TYPE;
use wreq::header::HeaderMap;
use wreq::header::HeaderValue;
use wreq::header::USER_AGENT;

use crate::relay::error::RelayError;

/// Raw answer of a webhook, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON document to a webhook and returns whatever came back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<UpstreamResponse, RelayError>;
}

/// [`Upstream`] backed by a shared `wreq` client.
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    pub fn new() -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("rental-stats/0.1"));
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for WebhookClient {
    async fn post_json(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<UpstreamResponse, RelayError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .body(body);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Webhook answered {status} with {} bytes", body.len());

        Ok(UpstreamResponse { status, body })
    }
}
