//! Row types for the destination sheet.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Envelope for the row collection: `{ "prices": [row, ...] }`.
///
/// The sheet API names the collection after the tab ("prices").
#[derive(Debug, Deserialize)]
pub struct PricesResponse {
    #[serde(default)]
    pub prices: Vec<DestinationRow>,
}

/// One watched destination.
///
/// `iata_code` is empty until a sync pass resolves it; `lowest_price` is the
/// alert threshold a fetched fare must undercut.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRow {
    pub id: i64,
    pub city: String,
    #[serde(default)]
    pub iata_code: String,
    pub lowest_price: Decimal,
}

impl DestinationRow {
    /// Whether the row already carries a resolved IATA code.
    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.iata_code.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_deserialize_from_sheet_payload() {
        let parsed: PricesResponse = serde_json::from_value(serde_json::json!({
            "prices": [
                { "city": "Paris", "iataCode": "PAR", "lowestPrice": 54, "id": 2 },
                { "city": "Tokyo", "iataCode": "", "lowestPrice": 485.50, "id": 3 }
            ]
        }))
        .expect("payload should deserialize");

        assert_eq!(parsed.prices.len(), 2);
        assert!(parsed.prices[0].has_code());
        assert!(!parsed.prices[1].has_code());
        assert_eq!(parsed.prices[0].lowest_price, Decimal::from(54));
    }

    #[test]
    fn missing_iata_code_defaults_to_empty() {
        let parsed: PricesResponse = serde_json::from_value(serde_json::json!({
            "prices": [ { "city": "Berlin", "lowestPrice": 42, "id": 5 } ]
        }))
        .expect("payload should deserialize");
        assert!(!parsed.prices[0].has_code());
    }
}
