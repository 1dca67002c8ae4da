// Google Sheets URL shape
pub const DOCUMENT_HOST_MARKER: &str = "docs.google.com";
pub const SPREADSHEET_PATH_MARKER: &str = "/spreadsheets/d/";
pub const SHEET_ID_SEGMENT_MARKER: &str = "d";
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com";

// Output layout
pub const DEFAULT_OUTPUT_DIR: &str = "farm_data_csv";
pub const CONTACTS_FILE_SUFFIX: &str = "_contacts.csv";
pub const PARTIAL_FILE_EXTENSION: &str = "part";

// Console report
pub const BANNER: &str = "Downloading farm data from Google Sheets...";
pub const RULE_WIDTH: usize = 50;
pub const NEXT_STEPS: &[&str] = &[
    "1. Open your FarmTrackr app",
    "2. Go to Import section",
    "3. Select each CSV file to import",
    "4. Review and confirm the data",
];

/// Built-in farm registry, in download order.
pub const FARM_SHEETS: &[(&str, &str)] = &[
    (
        "Alicante",
        "https://docs.google.com/spreadsheets/d/1nQmKfv_nTiDcW8DJhexLJRbZvH-wY4YTlR74BR1SUTY/edit?usp=drive_link",
    ),
    (
        "Cielo",
        "https://docs.google.com/spreadsheets/d/1tDS3ZuuzqQvV2HWEPhce3B1Pvd4hboAVu6QGR7KAPMQ/edit?usp=drive_link",
    ),
    (
        "Escala",
        "https://docs.google.com/spreadsheets/d/10RtH6xqaJVSdEgP3vL1voea7orJNGgnjnl4kxjEcUR8/edit?usp=drive_link",
    ),
    (
        "Ivy",
        "https://docs.google.com/spreadsheets/d/1LernlV9bfBYxpu0-4jbUq-qWZHiM68CstY36Iba6gDc/edit?usp=drive_link",
    ),
    (
        "Presidential",
        "https://docs.google.com/spreadsheets/d/1VtGOjuOw_11ehY5HXHkRWTHuml0FF2J4gPmCw6icvV4/edit?usp=drive_link",
    ),
    (
        "Santo_Tomas",
        "https://docs.google.com/spreadsheets/d/1U5c93QFjthKRNexGV_WYgGsedC-JQwbo8w1yl5RLHmM/edit?usp=drive_link",
    ),
    (
        "Sunterrace",
        "https://docs.google.com/spreadsheets/d/1vLju9E0D1iG4a9W-1iIUvMkQlitV6qTWXE3YuT2NHbg/edit?usp=drive_link",
    ),
    (
        "Versailles",
        "https://docs.google.com/spreadsheets/d/1nKN_zNKnmuNQESHJrPy6-ZOhOVULSCX42F6fxJjLHjo/edit?usp=drive_link",
    ),
    (
        "Victoria_Falls",
        "https://docs.google.com/spreadsheets/d/19X1EREijaqEyfLSPMYy4c3WhpYBeEJWql_xZcrgzmNc/edit?usp=drive_link",
    ),
];
