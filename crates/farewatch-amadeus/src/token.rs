//! OAuth2 client-credentials token management for [`AmadeusClient`].
//!
//! The provider issues short-lived bearer tokens (~30 minutes). The client
//! caches the current token and refreshes it once it is within the expiry
//! margin, so callers never handle tokens directly.

use std::time::{Duration, Instant};

use crate::client::{AmadeusClient, TOKEN_PATH};
use crate::error::AmadeusError;
use crate::types::TokenResponse;

/// Refresh the token this many seconds before the provider-reported expiry,
/// so an in-flight request never carries a token that dies mid-request.
const EXPIRY_MARGIN_SECS: u64 = 60;

pub(crate) struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl AmadeusClient {
    /// Returns a valid bearer token, fetching or refreshing it if needed.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::Token`] if the credentials are rejected.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the token response is malformed.
    pub(crate) async fn bearer_token(&self) -> Result<String, AmadeusError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.value.clone());
            }
            tracing::debug!("bearer token near expiry; refreshing");
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *guard = Some(fresh);
        Ok(value)
    }

    /// Requests a new token from the OAuth2 endpoint (form-encoded
    /// client-credentials grant).
    async fn fetch_token(&self) -> Result<CachedToken, AmadeusError> {
        let url = self.endpoint(TOKEN_PATH)?;
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.api_key.as_str()),
            ("client_secret", self.api_secret.as_str()),
        ];
        let response = self.client.post(url).form(&form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AmadeusError::Token(format!("HTTP {status}: {body}")));
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AmadeusError::Deserialize {
                context: TOKEN_PATH.to_string(),
                source: e,
            })?;

        let lifetime = parsed.expires_in.saturating_sub(EXPIRY_MARGIN_SECS);
        tracing::debug!(expires_in = parsed.expires_in, "obtained new bearer token");
        Ok(CachedToken {
            value: parsed.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }
}
