//! IMLGS sample archiver.
//!
//! Archives detail records from the NOAA geosamples API into a local,
//! resumable cache, then normalizes them for analytical use: partial
//! collection dates become Julian-day values with uncertainty radii,
//! and nested interval sub-records are flattened into grouped lists.
//! Bulk operations run over the identifier catalog under a bounded
//! concurrency cap; export is strictly sequential in catalog order.

pub mod api;
pub mod archive;
pub mod catalog;
pub mod domain;
pub mod normalize;
pub mod table;
