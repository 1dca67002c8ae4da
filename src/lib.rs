//! farmsheets-cli library
//!
//! This crate provides the core functionality for the `farmsheets-cli` binary.
//!
//! ## Overview
//!
//! - [`downloader`] - Resolves sheet IDs from Google Sheets URLs and saves each sheet's CSV export
//! - [`cli`] - Command-line interface for running a download batch or listing the registry
//! - [`config`] - Download settings and TOML-defined registries
//! - [`models`] - Registry entries, per-entry outcomes and batch summaries
//! - [`ui`] - Console report printed during and after a batch
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use farmsheets_cli::{config::ResolvedConfig, downloader, errors::AppResult, models, ui};
//!
//! # async fn example() -> AppResult<()> {
//! let client = reqwest::Client::new();
//! let registry = models::default_registry();
//!
//! let summary =
//!     downloader::run_batch(&client, &registry, &ResolvedConfig::default(), ui::print_entry)
//!         .await?;
//! ui::print_summary(&summary);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;
