//! LINE Messaging API push client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use super::{Notifier, NotifyError};

const LINE_PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// LINE caps a single text message at 5000 characters.
const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LineMessage {
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<LineMessage>,
}

impl<'a> PushRequest<'a> {
    fn text(to: &'a str, text: &str) -> Self {
        Self {
            to,
            messages: vec![LineMessage::Text {
                text: text.chars().take(MAX_TEXT_CHARS).collect(),
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineMessagingClient {
    http: Client,
    channel_token: String,
    endpoint: String,
}

impl LineMessagingClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(channel_token: impl Into<String>) -> Result<Self, NotifyError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("petshop-orders/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            channel_token: channel_token.into(),
            endpoint: LINE_PUSH_URL.to_string(),
        })
    }

    /// Points the client at another push endpoint, e.g. a local stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Notifier for LineMessagingClient {
    async fn push_text(&self, to: &str, text: &str) -> Result<(), NotifyError> {
        let res = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.channel_token)
            .json(&PushRequest::text(to, text))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(NotifyError::InvalidToken),
            StatusCode::TOO_MANY_REQUESTS => Err(NotifyError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(NotifyError::Http { status, body })
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> NotifyError {
    if e.is_timeout() {
        NotifyError::Timeout
    } else {
        NotifyError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_body_shape() {
        let body = serde_json::to_value(PushRequest::text("U123", "hello")).unwrap();
        assert_eq!(
            body,
            json!({ "to": "U123", "messages": [{ "type": "text", "text": "hello" }] })
        );
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "ก".repeat(MAX_TEXT_CHARS + 10);
        let request = PushRequest::text("U123", &long);
        let LineMessage::Text { text } = &request.messages[0];
        assert_eq!(text.chars().count(), MAX_TEXT_CHARS);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let client = LineMessagingClient::new("token")
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/push");
        let err = client.push_text("U123", "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_) | NotifyError::Timeout));
    }
}
