//! Alert text composition.
//!
//! The sinks take finished text; these helpers are the only place the alert
//! wording lives, so the chat and email channels always say the same thing.

use farewatch_amadeus::CheapestFare;

/// Message sent when a fare undercuts the stored threshold.
#[must_use]
pub fn deal_alert(city: &str, currency: &str, fare: &CheapestFare) -> String {
    let stops = match fare.stops {
        0 => String::new(),
        1 => " with 1 stop".to_string(),
        n => format!(" with {n} stops"),
    };
    format!(
        "Low price alert! Only {} {currency} to fly from {} to {} ({city}){stops}, on {} until {}.",
        fare.price, fare.origin, fare.destination, fare.out_date, fare.return_date
    )
}

/// Message sent when flights were found but none beat the threshold.
#[must_use]
pub fn no_deal(city: &str, currency: &str, fare: &CheapestFare) -> String {
    format!(
        "No lower price found for flights to {city}. Current price: {} {currency}.",
        fare.price
    )
}

/// Message sent when the search produced no usable flight data.
#[must_use]
pub fn no_data(city: &str) -> String {
    format!("No flight data available for {city}.")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn fare(stops: usize) -> CheapestFare {
        CheapestFare {
            price: "95.00".parse::<Decimal>().unwrap(),
            origin: "LON".to_string(),
            destination: "NYC".to_string(),
            out_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            stops,
        }
    }

    #[test]
    fn deal_alert_mentions_route_dates_and_price() {
        let text = deal_alert("New York", "GBP", &fare(0));
        assert_eq!(
            text,
            "Low price alert! Only 95.00 GBP to fly from LON to NYC (New York), \
             on 2025-06-01 until 2025-06-08."
        );
    }

    #[test]
    fn deal_alert_mentions_stops_when_indirect() {
        let text = deal_alert("New York", "GBP", &fare(1));
        assert!(text.contains("with 1 stop,"), "got: {text}");
        let text = deal_alert("New York", "GBP", &fare(2));
        assert!(text.contains("with 2 stops,"), "got: {text}");
    }

    #[test]
    fn no_deal_mentions_city_and_current_price() {
        let text = no_deal("New York", "GBP", &fare(0));
        assert_eq!(
            text,
            "No lower price found for flights to New York. Current price: 95.00 GBP."
        );
    }

    #[test]
    fn no_data_mentions_city() {
        assert_eq!(no_data("Tokyo"), "No flight data available for Tokyo.");
    }
}
