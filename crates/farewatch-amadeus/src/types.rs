//! Amadeus API response types.
//!
//! All types model the JSON payloads returned by the self-service endpoints.
//! Fields that can be absent in degraded responses carry `#[serde(default)]`
//! so a structurally incomplete offer deserializes to empty values and is
//! skipped by the selector instead of failing the whole response.

use serde::Deserialize;

/// Response from the OAuth2 client-credentials token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Response from the city/airport reference-data lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct CityLookupResponse {
    #[serde(default)]
    pub data: Vec<CityLocation>,
}

/// A single city/airport match from the reference-data lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityLocation {
    pub iata_code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Top-level flight-offers search response: `{ "data": [offer, ...] }`.
///
/// A missing or empty `data` array is valid and means no offers were found.
#[derive(Debug, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

/// One priced round-trip option. `itineraries[0]` is the outbound leg,
/// `itineraries[1]` the inbound leg.
#[derive(Debug, Deserialize)]
pub struct FlightOffer {
    #[serde(default)]
    pub price: OfferPrice,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

/// Provider-reported price. `grand_total` stays a string here and is parsed
/// to a decimal inside the selector, so one malformed price skips one offer
/// rather than failing the response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPrice {
    #[serde(default)]
    pub grand_total: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One direction of travel, as an ordered sequence of flown segments.
#[derive(Debug, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// A single non-stop flown leg.
#[derive(Debug, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub departure: FlightEndpoint,
    #[serde(default)]
    pub arrival: FlightEndpoint,
}

/// Airport and local timestamp at one end of a segment. `at` is the
/// provider's ISO-8601 local datetime, e.g. `"2025-06-01T09:15:00"`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    #[serde(default)]
    pub iata_code: String,
    #[serde(default)]
    pub at: String,
}
