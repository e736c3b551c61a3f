//! Bulk record materialization and export.
//!
//! Fetching runs in fixed-size batches with a hard barrier between
//! them: no request of batch N+1 starts before every request of batch
//! N has finished, which bounds peak concurrency and in-flight
//! response bodies. Export is strictly sequential so the output order
//! always matches catalog order and at most one record is materialized
//! at a time.

use std::io::Write;
use std::path::Path;

use futures::future::join_all;
use tracing::{info, warn};

use crate::catalog::IdentifierCatalog;
use crate::domain::Imlgs;

use super::{ArchiveError, RecordArchive};

/// Number of in-flight fetches per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Export progress is logged every this many records.
const EXPORT_LOG_EVERY: usize = 1000;

/// Outcome of a bulk fetch.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Records materialized, cache hits included.
    pub loaded: usize,
    /// Identifiers that could not be materialized.
    pub failed: Vec<(Imlgs, ArchiveError)>,
}

/// Outcome of an export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Lines written.
    pub written: usize,
    /// Identifiers skipped because their record was unavailable.
    pub failed: Vec<(Imlgs, ArchiveError)>,
}

/// Drives the archive over the identifier catalog.
pub struct BatchLoader<'a> {
    archive: &'a RecordArchive,
    catalog: &'a mut IdentifierCatalog,
    batch_size: usize,
}

impl<'a> BatchLoader<'a> {
    /// Create a loader over `archive` enumerating `catalog`.
    pub fn new(archive: &'a RecordArchive, catalog: &'a mut IdentifierCatalog) -> Self {
        Self {
            archive,
            catalog,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the number of in-flight fetches per batch.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }

    /// Materialize up to `limit` records into the cache.
    ///
    /// Loads the catalog first if needed. Per-identifier failures are
    /// recorded in the report and do not abort the remaining batches.
    pub async fn load_all(&mut self, limit: Option<usize>) -> Result<FetchReport, ArchiveError> {
        self.catalog.load(self.archive.client(), false).await?;
        let ids = self.catalog.ids();
        let ids = &ids[..limit.unwrap_or(ids.len()).min(ids.len())];

        let mut report = FetchReport::default();
        let total_batches = ids.len().div_ceil(self.batch_size);
        for (n, batch) in ids.chunks(self.batch_size).enumerate() {
            info!(batch = n + 1, total_batches, size = batch.len(), "waiting for batch");
            let archive = self.archive;
            let fetches: Vec<_> = batch
                .iter()
                .map(|id| async move { (id, archive.get_record(id).await) })
                .collect();

            for (id, result) in join_all(fetches).await {
                match result {
                    Ok(_) => report.loaded += 1,
                    Err(e) => {
                        warn!(id = %id, error = %e, "fetch failed");
                        report.failed.push((id.clone(), e));
                    }
                }
            }
        }

        info!(loaded = report.loaded, failed = report.failed.len(), "done");
        Ok(report)
    }

    /// Write every record as one JSON document per line, in catalog
    /// order.
    ///
    /// Loads the catalog first if needed. Records that cannot be
    /// materialized are skipped and recorded in the report.
    pub async fn export_all(&mut self, dest: &Path) -> Result<ExportReport, ArchiveError> {
        self.catalog.load(self.archive.client(), false).await?;
        let ids = self.catalog.ids();

        let file = std::fs::File::create(dest).map_err(|e| ArchiveError::Export {
            message: format!("failed to create {}: {e}", dest.display()),
        })?;
        let mut out = std::io::BufWriter::new(file);

        let mut report = ExportReport::default();
        let total = ids.len();
        for (n, id) in ids.iter().enumerate() {
            if n % EXPORT_LOG_EVERY == 0 {
                info!(n, total, "exporting");
            }

            let record = match self.archive.get_record(id).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(id = %id, error = %e, "skipping record");
                    report.failed.push((id.clone(), e));
                    continue;
                }
            };

            let line = serde_json::to_string(&record).map_err(|e| ArchiveError::Export {
                message: format!("failed to serialize {id}: {e}"),
            })?;
            writeln!(out, "{line}").map_err(|e| ArchiveError::Export {
                message: format!("failed to write {}: {e}", dest.display()),
            })?;
            report.written += 1;
        }

        out.flush().map_err(|e| ArchiveError::Export {
            message: format!("failed to write {}: {e}", dest.display()),
        })?;
        info!(written = report.written, failed = report.failed.len(), "export done");
        Ok(report)
    }
}
