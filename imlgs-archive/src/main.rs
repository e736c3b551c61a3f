//! Command-line interface for the IMLGS archiver.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use imlgs_archive::api::{ImlgsClient, ImlgsConfig};
use imlgs_archive::archive::{ArchiveError, BatchLoader, DEFAULT_BATCH_SIZE, RecordArchive};
use imlgs_archive::catalog::IdentifierCatalog;
use imlgs_archive::domain::Imlgs;
use imlgs_archive::table::import_sql;

#[derive(Parser)]
#[command(
    name = "imlgs-archive",
    about = "Archive, normalize and export IMLGS sample records",
    version
)]
struct Cli {
    /// Directory holding the record cache and identifier snapshot
    #[arg(long, default_value = "data", global = true)]
    archive_root: PathBuf,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the identifier list, persisting a snapshot if needed
    Identifiers {
        /// Re-walk the listing even if a snapshot exists
        #[arg(long)]
        reload: bool,
    },
    /// Fetch and cache detail records
    Fetch {
        /// Stop after this many identifiers
        #[arg(long)]
        limit: Option<usize>,
        /// In-flight fetches per batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
    /// Export every record as newline-delimited JSON
    Export {
        /// Destination file
        #[arg(default_value = "imlgs_records.jsonl")]
        output: PathBuf,
    },
    /// Print the columnar import statement for a CSV export
    Table {
        /// Path of the CSV export
        csv_source: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{failures} identifiers failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand, returning the number of failed identifiers.
async fn run(cli: Cli) -> Result<usize, Box<dyn std::error::Error>> {
    let Cli {
        archive_root,
        base_url,
        command,
    } = cli;

    match command {
        Command::Table { csv_source } => {
            println!("{}", import_sql(&csv_source.to_string_lossy()));
            Ok(0)
        }
        Command::Identifiers { reload } => {
            let (archive, mut catalog) = build(&archive_root, base_url.as_deref())?;
            catalog.load(archive.client(), reload).await?;
            println!("{} identifiers", catalog.len());
            Ok(0)
        }
        Command::Fetch { limit, batch_size } => {
            let (archive, mut catalog) = build(&archive_root, base_url.as_deref())?;
            let report = BatchLoader::new(&archive, &mut catalog)
                .with_batch_size(batch_size)
                .load_all(limit)
                .await?;
            println!("{} records loaded", report.loaded);
            report_failures(&report.failed);
            Ok(report.failed.len())
        }
        Command::Export { output } => {
            let (archive, mut catalog) = build(&archive_root, base_url.as_deref())?;
            let report = BatchLoader::new(&archive, &mut catalog)
                .export_all(&output)
                .await?;
            println!("{} records written to {}", report.written, output.display());
            report_failures(&report.failed);
            Ok(report.failed.len())
        }
    }
}

fn build(
    archive_root: &Path,
    base_url: Option<&str>,
) -> Result<(RecordArchive, IdentifierCatalog), Box<dyn std::error::Error>> {
    let mut config = ImlgsConfig::new();
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    let client = ImlgsClient::new(config)?;
    let archive = RecordArchive::new(client, archive_root);
    let catalog = IdentifierCatalog::new(archive_root);
    Ok((archive, catalog))
}

fn report_failures(failed: &[(Imlgs, ArchiveError)]) {
    for (id, error) in failed {
        warn!(id = %id, error = %error, "failed");
    }
}
