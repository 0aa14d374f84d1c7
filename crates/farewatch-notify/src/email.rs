//! Email sink over a SendGrid-style mail-send API.

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::NotifyError;

const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com/";
const MAIL_SEND_PATH: &str = "v3/mail/send";

#[derive(Debug, Serialize)]
struct MailAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<MailAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct MailContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: MailAddress<'a>,
    subject: &'a str,
    content: Vec<MailContent<'a>>,
}

/// Sends plain-text email through the mail-send API with a bearer key.
pub struct EmailNotifier {
    client: Client,
    api_key: String,
    from: String,
    endpoint: Url,
}

impl EmailNotifier {
    /// Creates a notifier for the production mail API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, from: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_base_url(api_key, from, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a notifier with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NotifyError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        from: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent("farewatch/0.1 (fare-tracking)")
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(MAIL_SEND_PATH))
            .map_err(|e| NotifyError::InvalidUrl {
                url: normalised.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            from: from.to_owned(),
            endpoint,
        })
    }

    /// Sends one plain-text email to every configured recipient.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::NoRecipients`] if `recipients` is empty.
    /// - [`NotifyError::Api`] on a non-2xx response.
    /// - [`NotifyError::Http`] on network failure.
    pub async fn send(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        if recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let request = MailSendRequest {
            personalizations: vec![Personalization {
                to: recipients
                    .iter()
                    .map(|r| MailAddress { email: r })
                    .collect(),
            }],
            from: MailAddress { email: &self.from },
            subject,
            content: vec![MailContent {
                content_type: "text/plain",
                value: body,
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
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

        tracing::debug!(recipients = recipients.len(), "email delivered");
        Ok(())
    }
}
