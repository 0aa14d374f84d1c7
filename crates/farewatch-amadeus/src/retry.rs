//! Retry with exponential back-off and jitter for the Amadeus client.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors (network failures, 5xx). Client-side errors, rejected
//! credentials, and malformed responses are returned immediately; retrying
//! cannot fix them and only burns provider quota.

use std::future::Future;
use std::time::Duration;

use crate::error::AmadeusError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// Retriable: network-level failures (timeout, connection reset) and HTTP 5xx.
/// Not retriable: 4xx API responses, rejected credentials, malformed JSON,
/// invalid URLs.
pub(crate) fn is_retriable(err: &AmadeusError) -> bool {
    match err {
        AmadeusError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        AmadeusError::Api { status, .. } => *status >= 500,
        AmadeusError::Token(_)
        | AmadeusError::Deserialize { .. }
        | AmadeusError::InvalidUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors.
///
/// Sleeps `backoff_base_ms * 2^(attempt-1)` with ±25 % jitter before each
/// retry, capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, AmadeusError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AmadeusError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient provider error; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
