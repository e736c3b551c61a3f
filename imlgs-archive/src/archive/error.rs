//! Archive error types.

use crate::api::ApiError;
use crate::catalog::CatalogError;
use crate::domain::time::DateError;

/// Errors from the record archive and its bulk operations.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// Remote fetch failed and no cached copy exists.
    #[error("remote fetch failed: {0}")]
    Remote(#[from] ApiError),

    /// A record carried an unusable collection date.
    #[error("{0}")]
    Date(#[from] DateError),

    /// Identifier catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cache file could not be read, parsed, or written.
    #[error("cache error: {message}")]
    Cache { message: String },

    /// Export destination could not be written.
    #[error("export error: {message}")]
    Export { message: String },
}
