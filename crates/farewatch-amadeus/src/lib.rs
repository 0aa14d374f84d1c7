//! Client for the Amadeus self-service flight APIs plus the cheapest-offer
//! selector that picks the best round-trip fare out of a search response.

mod cheapest;
mod client;
mod error;
mod retry;
mod token;
mod types;

pub use cheapest::{select_cheapest, BestOffer, CheapestFare};
pub use client::{AmadeusClient, OfferQuery};
pub use error::AmadeusError;
pub use types::{
    CityLocation, FlightEndpoint, FlightOffer, FlightOffersResponse, Itinerary, OfferPrice,
    Segment,
};
