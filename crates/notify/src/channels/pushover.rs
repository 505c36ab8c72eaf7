//! Pushover notification channel.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChannelError;
use crate::events::NotifyEvent;
use crate::NotifyChannel;

/// Pushover message endpoint.
pub const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Per-request timeout for the Pushover API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pushover notification channel.
///
/// Both the token and the user key must be present for the channel to be
/// enabled; otherwise sends are silently skipped.
pub struct PushoverChannel {
    token: Option<String>,
    user: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

/// Form body accepted by the messages endpoint.
#[derive(Serialize)]
struct PushoverForm<'a> {
    token: &'a str,
    user: &'a str,
    message: &'a str,
}

/// Error body returned on a rejected request.
#[derive(Deserialize, Default)]
struct PushoverErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

impl PushoverChannel {
    /// Create a Pushover channel with explicit credentials.
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn new(token: Option<String>, user: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            user: user.filter(|u| !u.is_empty()),
            endpoint: PUSHOVER_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the channel at a different messages endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.token.as_deref()?, self.user.as_deref()?))
    }
}

#[async_trait]
impl NotifyChannel for PushoverChannel {
    fn name(&self) -> &'static str {
        "pushover"
    }

    fn enabled(&self) -> bool {
        self.credentials().is_some()
    }

    async fn send(&self, event: &NotifyEvent) -> Result<(), ChannelError> {
        let Some((token, user)) = self.credentials() else {
            debug!("Pushover credentials missing, skipping");
            return Ok(());
        };

        let message = event.message();
        let form = PushoverForm {
            token,
            user,
            message: &message,
        };

        debug!(endpoint = %self.endpoint, "Sending Pushover notification");

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChannelError::RateLimited {
                channel: self.name(),
            });
        }

        let raw = response.text().await.unwrap_or_default();
        let parsed: PushoverErrorBody = serde_json::from_str(&raw).unwrap_or_default();
        let body = if parsed.errors.is_empty() {
            raw
        } else {
            parsed.errors.join("; ")
        };

        Err(ChannelError::Status {
            channel: self.name(),
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn channel_for(server: &MockServer) -> PushoverChannel {
        PushoverChannel::new(Some("app-token".to_string()), Some("user-key".to_string()))
            .with_endpoint(format!("{}/1/messages.json", server.uri()))
    }

    #[test]
    fn test_disabled_without_credentials() {
        assert!(!PushoverChannel::new(None, None).enabled());
        assert!(!PushoverChannel::new(Some("t".to_string()), None).enabled());
        assert!(!PushoverChannel::new(Some(String::new()), Some("u".to_string())).enabled());
        assert!(PushoverChannel::new(Some("t".to_string()), Some("u".to_string())).enabled());
    }

    #[tokio::test]
    async fn test_missing_credentials_is_silent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let channel = PushoverChannel::new(None, Some("user-key".to_string()))
            .with_endpoint(format!("{}/1/messages.json", server.uri()));
        let event = NotifyEvent::new_post("acct", 1, "hello");

        assert!(channel.send(&event).await.is_ok());
    }

    #[tokio::test]
    async fn test_posts_form_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("token=app-token"))
            .and(body_string_contains("user=user-key"))
            .and(body_string_contains("message=%40acct%3A+hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let event = NotifyEvent::new_post("acct", 42, "hello");
        channel_for(&server).send(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejection_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"user":"invalid","errors":["user identifier is invalid"],"status":0}"#,
            ))
            .mount(&server)
            .await;

        let event = NotifyEvent::new_post("acct", 42, "hello");
        let err = channel_for(&server).send(&event).await.unwrap_err();

        match err {
            ChannelError::Status { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "user identifier is invalid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let event = NotifyEvent::new_post("acct", 42, "hello");
        let err = channel_for(&server).send(&event).await.unwrap_err();

        assert!(matches!(err, ChannelError::RateLimited { .. }));
    }
}
