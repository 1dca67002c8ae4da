use crate::constants::{CONTACTS_FILE_SUFFIX, PARTIAL_FILE_EXTENSION};
use std::path::{Path, PathBuf};

/// Builds the `<Label>_contacts.csv` file name for a registry label.
///
/// Path separators and control characters are replaced with `_` so the
/// resulting name always stays inside the output directory.
pub fn contacts_filename(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{safe}{CONTACTS_FILE_SUFFIX}")
}

/// Sibling path used while a download is in flight (`<file>.part`).
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_FILE_EXTENSION);
    destination.with_file_name(name)
}
