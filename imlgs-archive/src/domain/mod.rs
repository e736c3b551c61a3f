//! Core domain types: catalog identifiers and collection-date
//! conversion.

mod identifier;
pub mod time;

pub use identifier::{Imlgs, InvalidImlgs};
pub use time::{DateError, JulianDay, julian_day_from_partial};
