//! HTTP client for the sheet row store.

use reqwest::{Client, Url};

use crate::error::SheetError;
use crate::types::{DestinationRow, PricesResponse};

/// Client for the destination sheet's REST endpoint.
///
/// The endpoint identifies the sheet and tab, e.g.
/// `https://api.sheety.co/<project>/flightDeals/prices`; rows are addressed as
/// `<endpoint>/<id>`. All requests carry basic auth.
pub struct SheetClient {
    client: Client,
    endpoint: Url,
    username: String,
    password: String,
}

impl SheetClient {
    /// Creates a new client for the given row-collection endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`SheetError::InvalidUrl`] if `endpoint` does not
    /// parse.
    pub fn new(
        endpoint: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("farewatch/0.1 (fare-tracking)")
            .build()?;

        let endpoint = Url::parse(endpoint.trim_end_matches('/')).map_err(|e| {
            SheetError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            client,
            endpoint,
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Fetches all destination rows.
    ///
    /// # Errors
    ///
    /// - [`SheetError::Api`] on a non-2xx response.
    /// - [`SheetError::Http`] on network failure.
    /// - [`SheetError::Deserialize`] if the response shape is unexpected.
    pub async fn list_destinations(&self) -> Result<Vec<DestinationRow>, SheetError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SheetError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PricesResponse =
            serde_json::from_str(&body).map_err(|e| SheetError::Deserialize {
                context: "list_destinations".to_string(),
                source: e,
            })?;
        Ok(parsed.prices)
    }

    /// Writes a resolved IATA code back to one row.
    ///
    /// The sheet API expects the singular tab name as the body wrapper:
    /// `{ "price": { "iataCode": "PAR" } }`.
    ///
    /// # Errors
    ///
    /// - [`SheetError::InvalidUrl`] if the row URL cannot be built.
    /// - [`SheetError::Api`] on a non-2xx response.
    /// - [`SheetError::Http`] on network failure.
    pub async fn update_iata_code(&self, row_id: i64, code: &str) -> Result<(), SheetError> {
        let row_url = self.row_url(row_id)?;
        let payload = serde_json::json!({ "price": { "iataCode": code } });

        let response = self
            .client
            .put(row_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(SheetError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(row_id, code, "updated destination IATA code");
        Ok(())
    }

    /// Builds `<endpoint>/<row_id>`.
    fn row_url(&self, row_id: i64) -> Result<Url, SheetError> {
        let raw = format!("{}/{row_id}", self.endpoint);
        Url::parse(&raw).map_err(|e| SheetError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }
}
