use crate::constants::{DOCUMENT_HOST_MARKER, SHEET_ID_SEGMENT_MARKER, SPREADSHEET_PATH_MARKER};
use crate::errors::AppResult;
use url::Url;

/// Extracts the spreadsheet identifier from a Google Sheets URL.
///
/// The URL must be hosted on `docs.google.com` and have a `/spreadsheets/d/`
/// path; the identifier is the path segment that follows the first `d`
/// segment. Anything else, including strings that are not URLs at all,
/// yields `None`.
///
/// ```
/// use farmsheets_cli::downloader::extract_sheet_id;
///
/// let url = "https://docs.google.com/spreadsheets/d/1tDS3ZuuzqQvV2HWEPhce3B1Pvd4hboAVu6QGR7KAPMQ/edit?usp=sharing";
/// assert_eq!(
///     extract_sheet_id(url).as_deref(),
///     Some("1tDS3ZuuzqQvV2HWEPhce3B1Pvd4hboAVu6QGR7KAPMQ")
/// );
/// assert_eq!(extract_sheet_id("https://example.com/spreadsheets/d/abc"), None);
/// ```
pub fn extract_sheet_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if !host.contains(DOCUMENT_HOST_MARKER) || !parsed.path().contains(SPREADSHEET_PATH_MARKER) {
        return None;
    }

    let mut segments = parsed.path().split('/');
    segments.find(|segment| *segment == SHEET_ID_SEGMENT_MARKER)?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Builds the CSV export URL for one sheet tab.
///
/// `<base>/spreadsheets/d/<sheet_id>/export?format=csv&gid=<gid>`
pub fn export_url(base: &str, sheet_id: &str, gid: u64) -> AppResult<Url> {
    let mut url = Url::parse(base)?.join(&format!("/spreadsheets/d/{sheet_id}/export"))?;
    url.query_pairs_mut()
        .clear()
        .append_pair("format", "csv")
        .append_pair("gid", &gid.to_string());
    Ok(url)
}
