use thiserror::Error;

/// Errors returned by the sheet store client.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sheet API answered with a non-2xx status.
    #[error("sheet API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid sheet endpoint \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
