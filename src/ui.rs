use crate::constants::{BANNER, NEXT_STEPS, RULE_WIDTH};
use crate::models::{BatchSummary, EntryOutcome, EntryStatus};

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header printed before the first download.
pub fn render_header() -> String {
    format!("{BANNER}\n{}", rule())
}

/// One console line describing how an entry went.
pub fn render_entry(outcome: &EntryOutcome) -> String {
    match &outcome.status {
        EntryStatus::Downloaded => format!("✓ Downloaded {}", outcome.destination.display()),
        EntryStatus::UnresolvedId => {
            format!("✗ Could not extract sheet ID from {} URL", outcome.label)
        }
        EntryStatus::Failed(error) => format!(
            "✗ Failed to download {}: {error}",
            outcome.destination.display()
        ),
    }
}

/// Closing report: counts, output location and the manual import steps.
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str(&rule());
    out.push('\n');
    out.push_str(&format!(
        "Download complete: {}/{} files downloaded\n",
        summary.succeeded(),
        summary.total()
    ));
    let dir = summary.output_dir.display().to_string();
    let dir = dir.trim_end_matches(['/', '\\']);
    out.push_str(&format!("Files saved to: {dir}/\n"));
    out.push_str("\nNext steps:");
    for step in NEXT_STEPS {
        out.push('\n');
        out.push_str(step);
    }
    out
}

pub fn print_header() {
    println!("{}", render_header());
}

pub fn print_entry(outcome: &EntryOutcome) {
    println!("{}", render_entry(outcome));
}

pub fn print_summary(summary: &BatchSummary) {
    println!("{}", render_summary(summary));
}
