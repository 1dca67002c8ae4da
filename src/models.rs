use crate::constants::FARM_SHEETS;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// One registry entry: a labelled Google Sheet to export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetSource {
    /// Human-readable label, also used to name the output file
    pub label: String,
    /// Google Sheets URL, usually the `/edit` link copied from the browser
    pub url: String,
    /// Sheet tab to export; `0` is the first tab
    #[serde(default)]
    pub gid: u64,
}

impl SheetSource {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            gid: 0,
        }
    }
}

/// Returns the built-in farm registry in its download order.
pub fn default_registry() -> Vec<SheetSource> {
    FARM_SHEETS
        .iter()
        .map(|(label, url)| SheetSource::new(*label, *url))
        .collect()
}

/// What happened to a single registry entry during a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// The CSV was fetched and written to the destination
    Downloaded,
    /// The URL did not look like a Google Sheets document URL
    UnresolvedId,
    /// Fetching or writing failed; holds the error description
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub label: String,
    pub destination: PathBuf,
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn is_success(&self) -> bool {
        self.status == EntryStatus::Downloaded
    }
}

/// Aggregate result of a batch run. Outcomes are kept in registry order.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub outcomes: Vec<EntryOutcome>,
    pub output_dir: PathBuf,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}
