//! Cheapest-offer selection over a flight-offers search response.
//!
//! [`select_cheapest`] scans the offers in document order and keeps the first
//! one with the lowest total price. It is a pure fold over the response: no
//! state survives a call, and a malformed offer (missing itinerary, empty
//! segment list, unparsable price or timestamp) is skipped rather than
//! surfaced as an error. "No usable data" is a first-class result,
//! [`BestOffer::Unavailable`], never a panic or an `Err`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{FlightOffer, FlightOffersResponse};

/// Result of a cheapest-offer scan.
///
/// The unavailable case is a variant rather than a sentinel price so callers
/// must branch before they can compare anything numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestOffer {
    /// The cheapest usable offer found in the response.
    Found(CheapestFare),
    /// Absent response, empty offer list, or no usable offer.
    Unavailable,
}

/// Summary of the winning offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheapestFare {
    pub price: Decimal,
    /// Departure airport of the first outbound segment.
    pub origin: String,
    /// Arrival airport of the last outbound segment. For indirect
    /// itineraries this is the true final destination, not the first stop.
    pub destination: String,
    /// Date part of the first outbound segment's departure.
    pub out_date: NaiveDate,
    /// Date part of the first inbound segment's departure.
    pub return_date: NaiveDate,
    /// Intermediate stops on the outbound leg: segment count minus one.
    pub stops: usize,
}

/// Picks the cheapest usable offer out of a search response.
///
/// `None` input models an upstream failure where no document was returned.
/// Ties on price keep the earliest offer in document order. Idempotent; the
/// debug events emitted as the running minimum improves are observability
/// only.
#[must_use]
pub fn select_cheapest(result: Option<&FlightOffersResponse>) -> BestOffer {
    let Some(response) = result else {
        tracing::info!("no flight data returned by search");
        return BestOffer::Unavailable;
    };
    if response.data.is_empty() {
        tracing::info!("search returned no offers");
        return BestOffer::Unavailable;
    }

    let cheapest = response
        .data
        .iter()
        .filter_map(parse_offer)
        .fold(None::<CheapestFare>, |best, fare| match best {
            Some(current) if fare.price >= current.price => Some(current),
            _ => {
                tracing::debug!(
                    price = %fare.price,
                    destination = %fare.destination,
                    "new lowest fare while scanning offers"
                );
                Some(fare)
            }
        });

    match cheapest {
        Some(fare) => BestOffer::Found(fare),
        None => {
            tracing::info!(
                offers = response.data.len(),
                "no usable offer among returned flight data"
            );
            BestOffer::Unavailable
        }
    }
}

/// Extracts a [`CheapestFare`] candidate from one offer, or `None` if the
/// offer is not usable: unparsable price, missing outbound or inbound
/// itinerary, empty segment lists, blank airport codes, or timestamps with
/// no parsable date part.
fn parse_offer(offer: &FlightOffer) -> Option<CheapestFare> {
    let price: Decimal = offer.price.grand_total.trim().parse().ok()?;

    let outbound = offer.itineraries.first()?;
    let inbound = offer.itineraries.get(1)?;
    let first_out = outbound.segments.first()?;
    let last_out = outbound.segments.last()?;
    let first_in = inbound.segments.first()?;

    let origin = non_blank(&first_out.departure.iata_code)?;
    let destination = non_blank(&last_out.arrival.iata_code)?;
    let out_date = date_part(&first_out.departure.at)?;
    let return_date = date_part(&first_in.departure.at)?;

    Some(CheapestFare {
        price,
        origin,
        destination,
        out_date,
        return_date,
        stops: outbound.segments.len() - 1,
    })
}

fn non_blank(code: &str) -> Option<String> {
    let trimmed = code.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Date portion of an ISO-8601 local datetime such as `"2025-06-01T09:15:00"`.
fn date_part(at: &str) -> Option<NaiveDate> {
    let date = at.split('T').next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
