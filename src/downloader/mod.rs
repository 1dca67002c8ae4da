//! Sheet identifier resolution and CSV export downloads.
//!
//! The main entry point is [`run_batch`], which walks a registry of labelled
//! Google Sheets URLs and saves each sheet's CSV export to the output directory.
//! [`extract_sheet_id`] and [`fetch_and_persist`] are the per-entry steps.

mod batch;
mod content_check;
mod file_downloader;
mod sheet_id;

// Re-export public API
pub use batch::run_batch;
pub use content_check::{ensure_not_html, looks_like_html};
pub use file_downloader::fetch_and_persist;
pub use sheet_id::{export_url, extract_sheet_id};
