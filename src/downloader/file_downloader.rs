use crate::downloader::content_check::{ensure_not_html, looks_like_html};
use crate::errors::{AppError, AppResult};
use crate::utils::partial_path;
use std::path::Path;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Downloads one sheet export and writes it to `destination`.
///
/// Makes a single GET request, no retries. A transport error or non-success
/// status fails the call before anything is written. On success the body is
/// written as UTF-8 text, replacing any existing file at `destination`.
///
/// # Behavior
///
/// - **Atomic write**: the body goes to `<destination>.part` first and is
///   renamed into place, so an interrupted write never leaves a truncated CSV.
/// - **HTML guard**: with `reject_html`, an HTML page returned in place of the
///   CSV is an error and nothing is written. Without it the page is saved
///   as-is and a warning is logged.
///
/// # Errors
///
/// Returns `NetworkError` for request failures and HTTP error statuses,
/// `ContentError` for a rejected HTML body and `IoError` for filesystem
/// failures.
pub async fn fetch_and_persist(
    client: &reqwest::Client,
    export_url: &Url,
    destination: &Path,
    reject_html: bool,
) -> AppResult<()> {
    debug!(url = %export_url, destination = %destination.display(), "Requesting sheet export");

    let response = client
        .get(export_url.as_str())
        .send()
        .await
        .map_err(|e| AppError::NetworkError(format!("Request failed: {e}")))?;

    let status = response.status();
    let response = response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::NetworkError(format!("HTTP {status_code}: {e}"))
    })?;

    let body = response
        .text()
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to read response body: {e}")))?;

    if reject_html {
        ensure_not_html(&body)?;
    } else if looks_like_html(&body) {
        warn!(
            destination = %destination.display(),
            "Export returned an HTML page; saving it as-is"
        );
    }

    write_atomically(destination, body.as_bytes()).await?;

    debug!(
        destination = %destination.display(),
        bytes = body.len(),
        "Sheet export written"
    );
    Ok(())
}

/// Writes `contents` to a `.part` sibling and renames it over `destination`.
pub(crate) async fn write_atomically(destination: &Path, contents: &[u8]) -> AppResult<()> {
    let tmp_path = partial_path(destination);

    // Remove stale tmp file if present (best-effort)
    if fs::metadata(&tmp_path).await.is_ok() {
        if let Err(e) = fs::remove_file(&tmp_path).await {
            warn!(
                file_path = %tmp_path.display(),
                error = %e,
                "Failed to remove stale temp file"
            );
        }
    }

    let result = write_then_rename(&tmp_path, destination, contents).await;
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path).await;
    }
    result
}

async fn write_then_rename(tmp_path: &Path, destination: &Path, contents: &[u8]) -> AppResult<()> {
    let mut file = File::create(tmp_path).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    file.write_all(contents).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to write to temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;
    file.flush().await?;

    // Ensure the file is closed before renaming
    drop(file);

    fs::rename(tmp_path, destination).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {}",
            tmp_path.display(),
            destination.display(),
            e
        ))
    })?;

    Ok(())
}
