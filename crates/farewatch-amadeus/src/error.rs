use thiserror::Error;

/// Errors returned by the Amadeus API client.
#[derive(Debug, Error)]
pub enum AmadeusError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; `body` carries the response
    /// text for diagnosis (the provider returns structured error JSON).
    #[error("API error from {endpoint}: HTTP {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The OAuth token endpoint rejected the client credentials.
    #[error("token request failed: {0}")]
    Token(String),

    /// A base URL or joined endpoint path could not be parsed.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
