use crate::errors::{AppError, AppResult};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

const HTML_PREFIX_PATTERN: &str = r"(?i)^\s*(<!doctype\s+html|<html)";
const TITLE_SELECTOR: &str = "title";

/// Cached regex matching the start of an HTML document.
static HTML_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

static TITLE_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Returns `true` when the body looks like an HTML page rather than CSV.
///
/// Google serves its sign-in or "access denied" page with a 200 status for
/// sheets that are not link-shared, so a successful response is not enough
/// to know the export worked.
pub fn looks_like_html(body: &str) -> bool {
    let re = HTML_PREFIX_REGEX.get_or_init(|| {
        Regex::new(HTML_PREFIX_PATTERN).expect("HTML_PREFIX_PATTERN is a valid regex pattern")
    });
    re.is_match(body)
}

/// Extracts the trimmed `<title>` text of an HTML page, if there is one.
pub fn html_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = TITLE_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(TITLE_SELECTOR).expect("TITLE_SELECTOR is a valid CSS selector")
    });

    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Fails with `ContentError` when the body is an HTML page.
pub fn ensure_not_html(body: &str) -> AppResult<()> {
    if !looks_like_html(body) {
        return Ok(());
    }
    let title = html_title(body).unwrap_or_else(|| "untitled page".to_string());
    Err(AppError::ContentError(format!(
        "expected CSV but received an HTML page ({title}); is the sheet shared publicly?"
    )))
}
