//! IMLGS geosamples API client.
//!
//! The service exposes a paginated summary listing (identifier
//! discovery) and a per-identifier detail endpoint. Every request
//! carries a fixed user-agent and `Accept: application/json`.

mod client;
mod error;
mod types;

pub use client::{ImlgsClient, ImlgsConfig};
pub use error::ApiError;
pub use types::{SummaryItem, SummaryPage};
