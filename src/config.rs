use crate::constants::{DEFAULT_EXPORT_BASE_URL, DEFAULT_OUTPUT_DIR};
use crate::errors::{AppError, AppResult};
use crate::models::{default_registry, SheetSource};
use crate::utils::contacts_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved download settings with all values filled in (no Options).
///
/// Deserialized from the `[download]` table of a TOML config; every key is
/// optional and falls back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Directory the `<Label>_contacts.csv` files are written to
    pub output_dir: PathBuf,
    /// Number of sheets fetched at the same time. `1` keeps the run strictly sequential.
    pub concurrent_downloads: usize,
    /// Refuse to save bodies that are HTML pages (e.g. the Google sign-in page
    /// served for private sheets) instead of writing them as CSV.
    pub reject_html: bool,
    /// Scheme and host the export requests are sent to
    pub export_base_url: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            concurrent_downloads: 1,
            reject_html: false,
            export_base_url: DEFAULT_EXPORT_BASE_URL.to_string(),
        }
    }
}

impl ResolvedConfig {
    fn validate(&self) -> AppResult<()> {
        if self.concurrent_downloads == 0 {
            return Err(AppError::InvalidInput(
                "Concurrent downloads must be greater than 0".into(),
            ));
        }
        url::Url::parse(&self.export_base_url)?;
        Ok(())
    }
}

/// Configuration loaded from a TOML file.
///
/// ```toml
/// [download]
/// output_dir = "exports"
/// concurrent_downloads = 4
///
/// [[sheets]]
/// label = "Cielo"
/// url = "https://docs.google.com/spreadsheets/d/<id>/edit"
/// gid = 0
/// ```
///
/// A file without `[[sheets]]` downloads the built-in farm registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    #[serde(default)]
    pub download: ResolvedConfig,
    #[serde(default = "default_registry")]
    pub sheets: Vec<SheetSource>,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `InvalidInput` if the
    /// TOML is malformed, contains unknown keys, sets `concurrent_downloads`
    /// to 0, or has a blank label or two labels sharing an output file.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::IoError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config: ResolvedConfigFile = toml::from_str(contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        config.download.validate()?;
        validate_registry(&config.sheets)?;

        Ok(config)
    }
}

/// Rejects blank labels and labels that map to the same output file.
pub fn validate_registry(sheets: &[SheetSource]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(sheets.len());
    for sheet in sheets {
        if sheet.label.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Sheet label must not be empty (url: {})",
                sheet.url
            )));
        }
        let filename = contacts_filename(&sheet.label);
        if !seen.insert(filename.clone()) {
            return Err(AppError::InvalidInput(format!(
                "Sheet label '{}' collides with another label on file '{filename}'",
                sheet.label
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_values() {
        let config = ResolvedConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("farm_data_csv"));
        assert_eq!(config.concurrent_downloads, 1);
        assert!(!config.reject_html);
        assert_eq!(config.export_base_url, "https://docs.google.com");
    }

    #[test]
    fn empty_toml_uses_defaults_and_builtin_registry() {
        let config = ResolvedConfigFile::from_toml_str("").unwrap();
        assert_eq!(config.download.concurrent_downloads, 1);
        assert_eq!(config.sheets, default_registry());
    }

    #[test]
    fn toml_file_with_sheets_is_parsed() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"
            [download]
            output_dir = "exports"
            concurrent_downloads = 3

            [[sheets]]
            label = "Cielo"
            url = "https://docs.google.com/spreadsheets/d/abc/edit"

            [[sheets]]
            label = "Ivy"
            url = "https://docs.google.com/spreadsheets/d/def/edit"
            gid = 42
            "#,
        )
        .unwrap();

        let config = ResolvedConfigFile::from_toml_file(tmp.path()).unwrap();
        assert_eq!(config.download.output_dir, PathBuf::from("exports"));
        assert_eq!(config.download.concurrent_downloads, 3);
        assert!(!config.download.reject_html);
        assert_eq!(config.sheets.len(), 2);
        assert_eq!(config.sheets[0].gid, 0);
        assert_eq!(config.sheets[1].label, "Ivy");
        assert_eq!(config.sheets[1].gid, 42);
    }

    #[test]
    fn zero_concurrency_errors() {
        let result = ResolvedConfigFile::from_toml_str(
            r#"
            [download]
            concurrent_downloads = 0
            "#,
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn invalid_export_base_url_errors() {
        let result = ResolvedConfigFile::from_toml_str(
            r#"
            [download]
            export_base_url = "not a url"
            "#,
        );
        assert!(matches!(result, Err(AppError::UrlError(_))));
    }

    #[test]
    fn unknown_key_errors() {
        let result = ResolvedConfigFile::from_toml_str(
            r#"
            [download]
            output_dir = "x"
            max_retries = 3
            "#,
        );
        assert!(result.is_err());

        let result = ResolvedConfigFile::from_toml_str(r#"verbose = true"#);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_labels_error() {
        let result = ResolvedConfigFile::from_toml_str(
            r#"
            [[sheets]]
            label = "Ivy"
            url = "https://docs.google.com/spreadsheets/d/a/edit"

            [[sheets]]
            label = "Ivy"
            url = "https://docs.google.com/spreadsheets/d/b/edit"
            "#,
        );
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn labels_sharing_a_file_error() {
        let sheets = vec![
            SheetSource::new("North/East", "https://docs.google.com/spreadsheets/d/a/edit"),
            SheetSource::new("North_East", "https://docs.google.com/spreadsheets/d/b/edit"),
        ];
        let err = validate_registry(&sheets).unwrap_err();
        assert!(err.to_string().contains("North_East_contacts.csv"));
    }

    #[test]
    fn labels_with_distinct_files_are_accepted() {
        let sheets = vec![
            SheetSource::new("Ivy", "https://docs.google.com/spreadsheets/d/a/edit"),
            SheetSource::new("Ivy ", "https://docs.google.com/spreadsheets/d/b/edit"),
        ];
        assert!(validate_registry(&sheets).is_ok());
    }

    #[test]
    fn blank_label_errors() {
        let sheets = vec![SheetSource::new("  ", "https://docs.google.com/x")];
        assert!(validate_registry(&sheets).is_err());
    }

    #[test]
    fn missing_file_errors() {
        let result = ResolvedConfigFile::from_toml_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(AppError::IoError(_))));
    }
}
