//! On-disk record archive.
//!
//! One JSON file per identifier, bucketed by the identifier's first
//! eight characters to keep directory entry counts sane. Files hold
//! the raw detail document plus the derived Julian-day fields;
//! interval flattening is recomputed on every read so the flattening
//! rules can evolve without invalidating the cache.

mod error;
mod loader;

pub use error::ArchiveError;
pub use loader::{BatchLoader, DEFAULT_BATCH_SIZE, ExportReport, FetchReport};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::api::ImlgsClient;
use crate::domain::Imlgs;
use crate::normalize::{RawRecord, attach_julian_days, normalize_intervals};

/// Local archive of detail records, backed by the remote API.
pub struct RecordArchive {
    client: ImlgsClient,
    root: PathBuf,
    /// Per-identifier locks so concurrent calls for the same id
    /// coalesce onto a single fetch.
    in_flight: Mutex<HashMap<Imlgs, Arc<Mutex<()>>>>,
}

impl RecordArchive {
    /// Create an archive rooted at `root`.
    pub fn new(client: ImlgsClient, root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            root: root.into(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &ImlgsClient {
        &self.client
    }

    /// The archive root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Retrieve the normalized record for `id`, fetching and caching
    /// it first when no copy is on disk.
    ///
    /// Reads never rewrite the cache file: a file written before the
    /// derived time fields existed is upgraded in memory only, and the
    /// persisted form always keeps its intervals unflattened. A remote
    /// failure surfaces only when there is no cached copy to fall back
    /// on.
    pub async fn get_record(&self, id: &Imlgs) -> Result<RawRecord, ArchiveError> {
        let lock = self.id_lock(id).await;
        let _guard = lock.lock().await;

        let path = self.record_path(id)?;
        if path.exists() {
            return read_cached(&path);
        }

        info!(id = %id, "retrieving");
        let mut record = self.client.fetch_detail(id).await?;
        attach_julian_days(&mut record)?;
        write_record(&path, &record)?;
        normalize_intervals(&mut record);
        info!(id = %id, "completed");
        Ok(record)
    }

    /// Path of the cache file for `id`, creating the bucket directory.
    fn record_path(&self, id: &Imlgs) -> Result<PathBuf, ArchiveError> {
        let bucket = self.root.join(id.bucket());
        if !bucket.exists() {
            std::fs::create_dir_all(&bucket).map_err(|e| ArchiveError::Cache {
                message: format!("failed to create {}: {e}", bucket.display()),
            })?;
        }
        Ok(bucket.join(format!("{}.json", id)))
    }

    async fn id_lock(&self, id: &Imlgs) -> Arc<Mutex<()>> {
        let mut map = self.in_flight.lock().await;
        map.entry(id.clone()).or_default().clone()
    }
}

fn read_cached(path: &Path) -> Result<RawRecord, ArchiveError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ArchiveError::Cache {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let mut record: RawRecord = serde_json::from_str(&contents).map_err(|e| ArchiveError::Cache {
        message: format!("failed to parse {}: {e}", path.display()),
    })?;

    // Files from before the derived fields existed are upgraded in
    // memory; the file itself is left alone.
    attach_julian_days(&mut record)?;
    normalize_intervals(&mut record);
    Ok(record)
}

fn write_record(path: &Path, record: &RawRecord) -> Result<(), ArchiveError> {
    let json = serde_json::to_string(record).map_err(|e| ArchiveError::Cache {
        message: format!("failed to serialize record: {e}"),
    })?;
    std::fs::write(path, json).map_err(|e| ArchiveError::Cache {
        message: format!("failed to write {}: {e}", path.display()),
    })
}
