//! Stateless forwarding of JSON requests to the automation webhooks.
//!
//! A [`Relay`] owns one configured endpoint. Every call is a single POST with
//! no retry; the upstream answer is either passed through untouched or turned
//! into a [`RelayError`].

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::warn;
use serde_json::Value;

use crate::config::WebhookConfig;
use crate::relay::error::RelayError;
use crate::relay::upstream::Upstream;

pub mod action;
pub mod error;
pub mod upstream;

pub use action::ContactAction;

/// Name the report webhook goes by in upstream status errors.
pub const WORKFLOW_ORIGIN: &str = "n8n webhook";
/// Name the contacts webhook goes by in upstream status errors.
pub const CONTACTS_ORIGIN: &str = "Webhook";

pub struct Relay {
    origin: &'static str,
    key: &'static str,
    endpoint: Option<String>,
    timeout: Duration,
    detail_limit: usize,
    upstream: Arc<dyn Upstream>,
}

impl Relay {
    pub fn new(
        origin: &'static str,
        webhook: &WebhookConfig,
        detail_limit: usize,
        upstream: Arc<dyn Upstream>,
    ) -> Self {
        Self {
            origin,
            key: webhook.key,
            endpoint: webhook.url.clone(),
            timeout: webhook.timeout,
            detail_limit,
            upstream,
        }
    }

    /// Environment variable the endpoint is read from.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Forwards `payload` and returns the webhook's JSON answer unchanged.
    pub async fn forward(&self, payload: &Value) -> Result<Value, RelayError> {
        let Some(url) = self.endpoint.as_deref() else {
            warn!("Refusing to relay: {} is not configured", self.key);
            return Err(RelayError::NotConfigured { key: self.key });
        };

        let body = serde_json::to_string(payload)?;
        debug!("Relaying {} bytes to {}", body.len(), self.key);

        let response = self.upstream.post_json(url, body, self.timeout).await?;

        if !response.is_success() {
            warn!("{} answered {}", self.key, response.status);
            return Err(RelayError::UpstreamStatus {
                origin: self.origin,
                status: response.status,
                detail: truncate_chars(&response.body, self.detail_limit),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            warn!("{} answered {} with non-JSON body: {e}", self.key, response.status);
            RelayError::InvalidJson {
                detail: truncate_chars(&response.body, self.detail_limit),
            }
        })
    }
}

/// First `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::relay::upstream::MockUpstream;
    use crate::relay::upstream::UpstreamResponse;

    fn webhook(url: Option<&str>) -> WebhookConfig {
        WebhookConfig {
            key: "N8N_WEBHOOK_URL",
            url: url.map(str::to_string),
            timeout: Duration::from_secs(60),
        }
    }

    fn relay_with(url: Option<&str>, upstream: MockUpstream) -> Relay {
        Relay::new(WORKFLOW_ORIGIN, &webhook(url), 500, Arc::new(upstream))
    }

    fn answer(status: u16, body: &str) -> UpstreamResponse {
        UpstreamResponse {
            status,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_never_calls_upstream() {
        let mut upstream = MockUpstream::new();
        upstream.expect_post_json().times(0);
        let relay = relay_with(None, upstream);

        let err = relay.forward(&json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::NotConfigured {
                key: "N8N_WEBHOOK_URL"
            }
        ));
        assert_eq!(err.to_string(), "N8N_WEBHOOK_URL not configured");
    }

    #[tokio::test]
    async fn test_body_is_forwarded_unmodified() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_post_json()
            .withf(|url, body, timeout| {
                url == "https://x.test/hook"
                    && serde_json::from_str::<Value>(body).unwrap()
                        == json!({ "frequency": "weekly", "customMessage": "Hi" })
                    && *timeout == Duration::from_secs(60)
            })
            .times(1)
            .returning(|_, _, _| Ok(answer(200, r#"{"success":true,"emailsSent":3}"#)));
        let relay = relay_with(Some("https://x.test/hook"), upstream);

        let value = relay
            .forward(&json!({ "frequency": "weekly", "customMessage": "Hi" }))
            .await
            .unwrap();
        assert_eq!(value, json!({ "success": true, "emailsSent": 3 }));
    }

    #[tokio::test]
    async fn test_upstream_status_is_reported() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_post_json()
            .times(1)
            .returning(|_, _, _| Ok(answer(503, "server busy")));
        let relay = relay_with(Some("https://x.test/hook"), upstream);

        let err = relay.forward(&json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "n8n webhook returned 503");
        match err {
            RelayError::UpstreamStatus { status, detail, .. } => {
                assert_eq!(status, 503);
                assert_eq!(detail, "server busy");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upstream_detail_is_truncated() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_post_json()
            .returning(|_, _, _| Ok(answer(500, &"é".repeat(800))));
        let relay = relay_with(Some("https://x.test/hook"), upstream);

        match relay.forward(&json!({})).await.unwrap_err() {
            RelayError::UpstreamStatus { detail, .. } => {
                assert_eq!(detail.chars().count(), 500)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_invalid() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_post_json()
            .returning(|_, _, _| Ok(answer(200, "not json")));
        let relay = relay_with(Some("https://x.test/hook"), upstream);

        let err = relay.forward(&json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON from webhook");
        assert!(matches!(err, RelayError::InvalidJson { ref detail } if detail == "not json"));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut upstream = MockUpstream::new();
        upstream.expect_post_json().returning(|_, _, _| {
            Err(RelayError::RequestFailed("connection refused".into()))
        });
        let relay = relay_with(Some("https://x.test/hook"), upstream);

        let err = relay.forward(&json!({})).await.unwrap_err();
        assert!(matches!(err, RelayError::RequestFailed(_)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("", 3), "");
    }
}
