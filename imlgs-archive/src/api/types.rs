//! Remote API response DTOs.

use serde::Deserialize;

/// One row of the paginated summary listing.
///
/// Only the identifier is used here; the remaining summary fields are
/// ignored. Rows without an identifier are skipped by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryItem {
    #[serde(default)]
    pub imlgs: Option<String>,
}

/// A page of the summary listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryPage {
    /// Page number as reported by the server.
    pub page: u32,
    /// Total page count for the current page size.
    pub total_pages: u32,
    #[serde(default)]
    pub items: Vec<SummaryItem>,
}
