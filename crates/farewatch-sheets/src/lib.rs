//! Client for the spreadsheet-backed destination store.
//!
//! Destinations live as rows in a hosted sheet exposed over a small REST API
//! (Sheety-style): `GET` the row collection, `PUT` a single row to update its
//! resolved IATA code. The sheet is the system's only persistent state.

mod client;
mod error;
mod types;

pub use client::SheetClient;
pub use error::SheetError;
pub use types::{DestinationRow, PricesResponse};
