use crate::config::ResolvedConfig;
use crate::downloader::file_downloader::fetch_and_persist;
use crate::downloader::sheet_id::{export_url, extract_sheet_id};
use crate::errors::{AppError, AppResult};
use crate::models::{BatchSummary, EntryOutcome, EntryStatus, SheetSource};
use crate::utils::contacts_filename;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info, warn};

/// Downloads every registry entry into the configured output directory.
///
/// The output directory is created first (an existing directory is fine).
/// Each entry is then handled on its own: a URL without a sheet identifier or
/// a failed download is recorded in its [`EntryOutcome`] and never stops the
/// remaining entries. `on_outcome` is called once per entry, in registry order,
/// as soon as that entry and all entries before it have finished.
///
/// With `concurrent_downloads == 1` requests are issued strictly one after the
/// other; larger values overlap up to that many requests.
///
/// # Errors
///
/// Only a failure to create the output directory is returned as an error.
///
/// # Example
///
/// ```no_run
/// use farmsheets_cli::{config::ResolvedConfig, downloader, models};
///
/// # async fn example() -> farmsheets_cli::errors::AppResult<()> {
/// let client = reqwest::Client::new();
/// let registry = models::default_registry();
/// let summary =
///     downloader::run_batch(&client, &registry, &ResolvedConfig::default(), |_| {}).await?;
/// println!("{}/{}", summary.succeeded(), summary.total());
/// # Ok(())
/// # }
/// ```
pub async fn run_batch<F>(
    client: &reqwest::Client,
    registry: &[SheetSource],
    config: &ResolvedConfig,
    mut on_outcome: F,
) -> AppResult<BatchSummary>
where
    F: FnMut(&EntryOutcome),
{
    let started = Instant::now();
    let output_dir = &config.output_dir;

    fs::create_dir_all(output_dir).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create directory {}: {e}",
            output_dir.display()
        ))
    })?;

    let concurrency = config.concurrent_downloads.max(1);
    info!(
        total = registry.len(),
        concurrency,
        output_dir = %output_dir.display(),
        "Starting download"
    );

    let outcomes: Vec<EntryOutcome> = stream::iter(registry)
        .map(|source| process_entry(client, source, config))
        .buffered(concurrency)
        .inspect(|outcome| on_outcome(outcome))
        .collect()
        .await;

    let summary = BatchSummary {
        outcomes,
        output_dir: output_dir.clone(),
        elapsed: started.elapsed(),
    };

    info!(
        downloaded = summary.succeeded(),
        failed = summary.failed(),
        total = summary.total(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Download completed"
    );

    Ok(summary)
}

async fn process_entry(
    client: &reqwest::Client,
    source: &SheetSource,
    config: &ResolvedConfig,
) -> EntryOutcome {
    let destination = config.output_dir.join(contacts_filename(&source.label));

    let status = match extract_sheet_id(&source.url) {
        None => {
            warn!(label = %source.label, url = %source.url, "Could not extract sheet ID");
            EntryStatus::UnresolvedId
        }
        Some(sheet_id) => {
            debug!(label = %source.label, sheet_id = %sheet_id, gid = source.gid, "Resolved sheet ID");
            let result = match export_url(&config.export_base_url, &sheet_id, source.gid) {
                Ok(url) => fetch_and_persist(client, &url, &destination, config.reject_html).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => EntryStatus::Downloaded,
                Err(e) => {
                    warn!(
                        label = %source.label,
                        error = %e,
                        "Failed to download sheet"
                    );
                    EntryStatus::Failed(e.to_string())
                }
            }
        }
    };

    EntryOutcome {
        label: source.label.clone(),
        destination,
        status,
    }
}
