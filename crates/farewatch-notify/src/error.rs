use thiserror::Error;

/// Errors returned by the notification sinks.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery endpoint answered with a non-2xx status.
    #[error("delivery failed: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The configured webhook or API URL is not valid.
    #[error("invalid notification URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Email delivery was requested without any recipients configured.
    #[error("no email recipients configured")]
    NoRecipients,
}
