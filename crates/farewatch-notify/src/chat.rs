//! Chat webhook sink.

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::NotifyError;

/// Payload for a webhook chat message: `{ "content": text }`.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    content: &'a str,
}

/// Sends plain-text messages to a chat webhook URL.
pub struct ChatNotifier {
    client: Client,
    webhook_url: Url,
}

impl ChatNotifier {
    /// Creates a notifier for the given webhook URL.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NotifyError::InvalidUrl`] if the URL does
    /// not parse.
    pub fn new(webhook_url: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent("farewatch/0.1 (fare-tracking)")
            .build()?;
        let webhook_url = Url::parse(webhook_url).map_err(|e| NotifyError::InvalidUrl {
            url: webhook_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Posts one message to the webhook.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Api`] on a non-2xx response.
    /// - [`NotifyError::Http`] on network failure.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&ChatMessage { content: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(chars = text.len(), "chat message delivered");
        Ok(())
    }
}
