//! HTTP transport for imagery requests.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use tracing::debug;

use imagery_common::{ViewerError, ViewerResult};

use crate::config::ClientConfig;

/// A successful response body and the content type the server reported.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: Bytes,
    pub content_type: Option<String>,
}

impl RawResponse {
    pub fn new(body: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.map(str::to_string),
        }
    }
}

/// Trait for anything that can perform a binary GET.
#[async_trait]
pub trait ImageryTransport: Send + Sync {
    /// Issue one GET with the given query pairs.
    ///
    /// Non-2xx responses are errors. Implementations must not retry.
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> ViewerResult<RawResponse>;
}

/// reqwest-backed transport used against the real provider.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> ViewerResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ViewerError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageryTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> ViewerResult<RawResponse> {
        // Query strings carry the API key, so URLs are stripped from errors.
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ViewerError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| ViewerError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = provider_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string));
            debug!(status = status.as_u16(), message = ?message, "Imagery request rejected");
            return Err(ViewerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(RawResponse { body, content_type })
    }
}

/// Pull a human-readable message out of a provider error body.
///
/// The provider answers errors with JSON shaped either `{"msg": "..."}` or
/// `{"error": {"code": "...", "message": "..."}}`.
pub fn provider_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    let message = value
        .get("msg")
        .and_then(|m| m.as_str())
        .or_else(|| value.pointer("/error/message").and_then(|m| m.as_str()))
        .or_else(|| value.get("error").and_then(|m| m.as_str()))?;

    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_msg_field() {
        let body = br#"{"msg": "No imagery for specified date.", "code": 404}"#;
        assert_eq!(
            provider_message(body),
            Some("No imagery for specified date.".to_string())
        );
    }

    #[test]
    fn test_provider_message_nested_error() {
        let body = br#"{"error": {"code": "API_KEY_INVALID", "message": "An invalid api_key was supplied."}}"#;
        assert_eq!(
            provider_message(body),
            Some("An invalid api_key was supplied.".to_string())
        );
    }

    #[test]
    fn test_provider_message_non_json() {
        assert_eq!(provider_message(b"<html>Bad Gateway</html>"), None);
        assert_eq!(provider_message(br#"{"msg": "  "}"#), None);
    }
}
