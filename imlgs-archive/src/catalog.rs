//! Identifier discovery and the persisted identifier snapshot.
//!
//! The full identifier set is discovered by walking the paginated
//! summary listing. A full walk is slow, so the result is persisted as
//! a JSON array next to the record cache and reused on later runs
//! unless a reload is requested.

use std::path::{Path, PathBuf};

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::api::{ApiError, ImlgsClient};
use crate::domain::Imlgs;

/// Filename of the identifier snapshot, relative to the archive root.
const SNAPSHOT_FILE: &str = "pids.json";

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The summary listing could not be walked.
    #[error("listing failed: {0}")]
    Api(#[from] ApiError),

    /// Snapshot file could not be read, parsed, or written.
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}

/// Walk the summary listing, yielding identifiers lazily.
///
/// Pages are requested starting at 1. The server-reported total page
/// count is read once, from the first response, and trusted for the
/// rest of the walk; a total that changes mid-walk goes unnoticed.
/// The walk ends at the reported final page or after `max_rows`
/// identifiers, whichever comes first. Rows without a usable
/// identifier are skipped.
pub fn list_identifiers(
    client: &ImlgsClient,
    max_rows: Option<usize>,
) -> impl Stream<Item = Result<Imlgs, ApiError>> + '_ {
    stream::try_unfold((1u32, None), move |(page_no, total)| async move {
        if let Some(last) = total
            && page_no > last
        {
            return Ok::<_, ApiError>(None);
        }

        let page = client.fetch_summary_page(page_no).await?;
        let last: u32 = total.unwrap_or(page.total_pages);
        debug!(page = page.page, total_pages = last, "summary page");

        let ids: Vec<Result<Imlgs, ApiError>> = page
            .items
            .into_iter()
            .filter_map(|item| item.imlgs)
            .filter_map(|id| Imlgs::parse(&id).ok())
            .map(Ok)
            .collect();

        // The stop test uses the server-reported page number.
        let next_page = if page.page >= last { last + 1 } else { page_no + 1 };
        Ok(Some((stream::iter(ids), (next_page, Some(last)))))
    })
    .try_flatten()
    .take(max_rows.unwrap_or(usize::MAX))
}

/// The set of known identifiers for one archive.
///
/// Loaded at most once per run; afterwards the sequence is treated as
/// immutable and is the enumeration domain for all batch operations.
#[derive(Debug)]
pub struct IdentifierCatalog {
    snapshot_path: PathBuf,
    ids: Option<Vec<Imlgs>>,
}

impl IdentifierCatalog {
    /// Create a catalog whose snapshot lives under `archive_root`.
    pub fn new(archive_root: impl AsRef<Path>) -> Self {
        Self {
            snapshot_path: archive_root.as_ref().join(SNAPSHOT_FILE),
            ids: None,
        }
    }

    /// Whether the identifier set has been loaded this run.
    pub fn is_loaded(&self) -> bool {
        self.ids.is_some()
    }

    /// Identifiers in catalog order. Empty until `load` succeeds.
    pub fn ids(&self) -> &[Imlgs] {
        self.ids.as_deref().unwrap_or(&[])
    }

    /// Number of loaded identifiers.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    /// Whether no identifiers are loaded.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Path of the on-disk snapshot.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Load the identifier set.
    ///
    /// Resolution order: already-loaded state, then the on-disk
    /// snapshot, then a full walk of the listing (which persists a
    /// fresh snapshot, overwriting any prior one). `reload` skips the
    /// first two and forces a re-walk.
    pub async fn load(&mut self, client: &ImlgsClient, reload: bool) -> Result<(), CatalogError> {
        if self.ids.is_some() && !reload {
            return Ok(());
        }

        if !reload && self.snapshot_path.exists() {
            let ids = self.read_snapshot()?;
            info!(count = ids.len(), "loaded identifiers from snapshot");
            self.ids = Some(ids);
            return Ok(());
        }

        info!("loading identifiers from API");
        let ids: Vec<Imlgs> = list_identifiers(client, None).try_collect().await?;
        self.write_snapshot(&ids)?;
        info!(count = ids.len(), "done loading identifiers");
        self.ids = Some(ids);
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Vec<Imlgs>, CatalogError> {
        let contents =
            std::fs::read_to_string(&self.snapshot_path).map_err(|e| CatalogError::Snapshot {
                message: format!("failed to read {}: {e}", self.snapshot_path.display()),
            })?;
        serde_json::from_str(&contents).map_err(|e| CatalogError::Snapshot {
            message: format!("failed to parse {}: {e}", self.snapshot_path.display()),
        })
    }

    fn write_snapshot(&self, ids: &[Imlgs]) -> Result<(), CatalogError> {
        if let Some(parent) = self.snapshot_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Snapshot {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }

        let json = serde_json::to_string(ids).map_err(|e| CatalogError::Snapshot {
            message: format!("failed to serialize snapshot: {e}"),
        })?;
        std::fs::write(&self.snapshot_path, json).map_err(|e| CatalogError::Snapshot {
            message: format!("failed to write {}: {e}", self.snapshot_path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImlgsConfig;
    use tempfile::tempdir;

    /// A client pointing at a dead address; snapshot paths must not
    /// touch it.
    fn offline_client() -> ImlgsClient {
        ImlgsClient::new(ImlgsConfig::new().with_base_url("http://127.0.0.1:9")).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<Imlgs> {
        names.iter().map(|n| Imlgs::parse(n).unwrap()).collect()
    }

    #[tokio::test]
    async fn load_uses_existing_snapshot_without_network() {
        let dir = tempdir().unwrap();
        let snapshot = ids(&["imlgs0001", "imlgs0002"]);
        std::fs::write(
            dir.path().join(SNAPSHOT_FILE),
            serde_json::to_string(&snapshot).unwrap(),
        )
        .unwrap();

        let mut catalog = IdentifierCatalog::new(dir.path());
        catalog.load(&offline_client(), false).await.unwrap();

        assert!(catalog.is_loaded());
        assert_eq!(catalog.ids(), snapshot.as_slice());
    }

    #[tokio::test]
    async fn load_is_idempotent_once_populated() {
        let dir = tempdir().unwrap();
        let snapshot = ids(&["imlgs0001"]);
        let path = dir.path().join(SNAPSHOT_FILE);
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        let mut catalog = IdentifierCatalog::new(dir.path());
        catalog.load(&offline_client(), false).await.unwrap();

        // Even with the snapshot gone, a second load is a no-op.
        std::fs::remove_file(&path).unwrap();
        catalog.load(&offline_client(), false).await.unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SNAPSHOT_FILE), "not json").unwrap();

        let mut catalog = IdentifierCatalog::new(dir.path());
        let err = catalog.load(&offline_client(), false).await.unwrap_err();
        assert!(matches!(err, CatalogError::Snapshot { .. }));
        assert!(!catalog.is_loaded());
    }

    #[test]
    fn empty_until_loaded() {
        let catalog = IdentifierCatalog::new("/nonexistent");
        assert!(!catalog.is_loaded());
        assert!(catalog.is_empty());
        assert_eq!(catalog.ids(), &[] as &[Imlgs]);
    }
}
