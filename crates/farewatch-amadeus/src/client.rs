//! HTTP client for the Amadeus self-service flight APIs.
//!
//! Wraps `reqwest` with OAuth2 token management, typed response
//! deserialization, and retry on transient failures. Endpoints covered:
//! city/airport IATA lookup and round-trip flight-offers search.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::error::AmadeusError;
use crate::retry::retry_with_backoff;
use crate::token::CachedToken;
use crate::types::{CityLookupResponse, FlightOffersResponse};

const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com/";

pub(crate) const TOKEN_PATH: &str = "v1/security/oauth2/token";
const CITY_LOOKUP_PATH: &str = "v1/reference-data/locations/cities";
const FLIGHT_OFFERS_PATH: &str = "v2/shopping/flight-offers";

/// Parameters for one round-trip flight-offers search.
#[derive(Debug, Clone)]
pub struct OfferQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    /// Restrict results to non-stop itineraries.
    pub non_stop_only: bool,
    /// Currency code the provider should quote prices in, e.g. `"GBP"`.
    pub currency: String,
    /// Maximum number of offers to return.
    pub max_offers: u32,
}

impl OfferQuery {
    /// Renders the query as provider query-string parameters. Searches are
    /// always for one adult; the date range and routing come from the caller.
    fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("originLocationCode", self.origin.clone()),
            ("destinationLocationCode", self.destination.clone()),
            (
                "departureDate",
                self.departure_date.format("%Y-%m-%d").to_string(),
            ),
            ("returnDate", self.return_date.format("%Y-%m-%d").to_string()),
            ("adults", "1".to_string()),
            ("nonStop", self.non_stop_only.to_string()),
            ("currencyCode", self.currency.clone()),
            ("max", self.max_offers.to_string()),
        ]
    }
}

/// Client for the Amadeus self-service APIs.
///
/// Holds the HTTP client, client credentials, and a cached bearer token that
/// is refreshed transparently when it nears expiry. Use [`AmadeusClient::new`]
/// for production or [`AmadeusClient::with_base_url`] to point at a mock
/// server in tests.
pub struct AmadeusClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
    base_url: Url,
    pub(crate) token: Mutex<Option<CachedToken>>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl AmadeusClient {
    /// Creates a new client pointed at the provider's test environment.
    ///
    /// # Errors
    ///
    /// Returns [`AmadeusError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, api_secret: &str, timeout_secs: u64) -> Result<Self, AmadeusError> {
        Self::with_base_url(api_key, api_secret, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AmadeusError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AmadeusError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        api_secret: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AmadeusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("farewatch/0.1 (fare-tracking)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AmadeusError::InvalidUrl {
            url: normalised.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            api_secret: api_secret.to_owned(),
            base_url,
            token: Mutex::new(None),
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the retry policy (attempts beyond the first, back-off base).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Looks up the IATA code for a city by name.
    ///
    /// Returns `Ok(None)` when the provider knows no match; the caller decides
    /// whether that is worth a warning. The first match wins when the provider
    /// returns several.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::Token`] if client credentials are rejected.
    /// - [`AmadeusError::Api`] on a non-2xx response.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the response shape is unexpected.
    pub async fn city_code(&self, city_name: &str) -> Result<Option<String>, AmadeusError> {
        let params = [
            ("keyword", city_name.to_string()),
            ("max", "2".to_string()),
            ("include", "AIRPORTS".to_string()),
        ];
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.authed_get(CITY_LOOKUP_PATH, &params)
        })
        .await?;

        let parsed: CityLookupResponse =
            serde_json::from_value(body).map_err(|e| AmadeusError::Deserialize {
                context: format!("cityCode(keyword={city_name})"),
                source: e,
            })?;

        Ok(parsed.data.into_iter().next().map(|c| c.iata_code))
    }

    /// Searches round-trip flight offers for the given query.
    ///
    /// An empty `data` array in the response is a valid "no offers" result,
    /// not an error; feed the response to
    /// [`crate::select_cheapest`] to pick the best fare.
    ///
    /// # Errors
    ///
    /// - [`AmadeusError::Token`] if client credentials are rejected.
    /// - [`AmadeusError::Api`] on a non-2xx response.
    /// - [`AmadeusError::Http`] on network failure.
    /// - [`AmadeusError::Deserialize`] if the response shape is unexpected.
    pub async fn search_offers(
        &self,
        query: &OfferQuery,
    ) -> Result<FlightOffersResponse, AmadeusError> {
        let params = query.to_params();
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.authed_get(FLIGHT_OFFERS_PATH, &params)
        })
        .await?;

        serde_json::from_value(body).map_err(|e| AmadeusError::Deserialize {
            context: format!(
                "flightOffers({} -> {})",
                query.origin, query.destination
            ),
            source: e,
        })
    }

    /// Resolves `path` against the stored base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, AmadeusError> {
        self.base_url.join(path).map_err(|e| AmadeusError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    /// Sends a bearer-authenticated GET, asserts a 2xx status, and parses the
    /// body as JSON. The cached token is fetched or refreshed first.
    async fn authed_get<P: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<serde_json::Value, AmadeusError> {
        let token = self.bearer_token().await?;
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AmadeusError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AmadeusError::Deserialize {
            context: path.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> AmadeusClient {
        AmadeusClient::with_base_url("key", "secret", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_relative_paths() {
        let client = test_client("https://test.api.amadeus.com");
        let url = client.endpoint(FLIGHT_OFFERS_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "https://test.api.amadeus.com/v2/shopping/flight-offers"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let client = test_client("http://127.0.0.1:9999///");
        let url = client.endpoint(TOKEN_PATH).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9999/v1/security/oauth2/token");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = AmadeusClient::with_base_url("key", "secret", 30, "not a url");
        assert!(matches!(result, Err(AmadeusError::InvalidUrl { .. })));
    }

    #[test]
    fn offer_query_params_cover_the_search_contract() {
        let query = OfferQuery {
            origin: "LON".to_string(),
            destination: "NYC".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            non_stop_only: false,
            currency: "GBP".to_string(),
            max_offers: 10,
        };
        let params = query.to_params();
        assert!(params.contains(&("originLocationCode", "LON".to_string())));
        assert!(params.contains(&("destinationLocationCode", "NYC".to_string())));
        assert!(params.contains(&("departureDate", "2025-06-01".to_string())));
        assert!(params.contains(&("returnDate", "2025-11-28".to_string())));
        assert!(params.contains(&("adults", "1".to_string())));
        assert!(params.contains(&("nonStop", "false".to_string())));
        assert!(params.contains(&("currencyCode", "GBP".to_string())));
        assert!(params.contains(&("max", "10".to_string())));
    }
}
