use crate::config::{validate_registry, ResolvedConfig, ResolvedConfigFile};
use crate::downloader::{extract_sheet_id, run_batch};
use crate::errors::{AppError, AppResult};
use crate::models::{default_registry, BatchSummary, SheetSource};
use crate::ui;
use crate::utils::contacts_filename;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the `farmsheets-cli` command definition.
///
/// - `run` (also used when no subcommand is given): download the built-in registry
/// - `toml <config>`: download the registry and settings from a TOML file
/// - `list [--config <toml>]`: show each registry entry with its resolved sheet ID, without downloading
pub fn build_command() -> Command<'static> {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("run")
                .about("Download the built-in farm sheets as CSV")
                .after_help("Example:\n  farmsheets-cli run -o exports -c 4 --reject-html")
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory the CSV files are written to")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("concurrency")
                        .short('c')
                        .long("concurrency")
                        .help("Number of sheets downloaded at the same time")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("reject_html")
                        .long("reject-html")
                        .help("Treat an HTML page (e.g. a sign-in page) as a failed download")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List the farm sheets and their IDs without downloading")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("List the registry from this TOML config instead of the built-in one")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
}

/// Parses command-line arguments and executes the selected subcommand.
///
/// Per-sheet failures are reported on the console and do not make this
/// function fail; only setup problems do (unreadable or invalid config,
/// output directory that cannot be created, HTTP client construction).
pub async fn cli() -> AppResult<()> {
    let matches = build_command().get_matches();

    match matches.subcommand() {
        Some(("run", sub)) => {
            let config = config_from_run_args(sub)?;
            run_workflow(&default_registry(), &config).await?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");

            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            run_workflow(&file_config.sheets, &file_config.download).await?;
        }
        Some(("list", sub)) => {
            let registry = registry_for_list(sub)?;
            for line in render_registry(&registry) {
                println!("{line}");
            }
        }
        _ => {
            run_workflow(&default_registry(), &ResolvedConfig::default()).await?;
        }
    }

    Ok(())
}

/// Applies `run` flags on top of the default settings.
pub fn config_from_run_args(sub: &ArgMatches) -> AppResult<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    if let Some(dir) = sub.get_one::<PathBuf>("output_dir") {
        config.output_dir = dir.clone();
    }
    if let Some(&concurrency) = sub.get_one::<usize>("concurrency") {
        if concurrency == 0 {
            return Err(AppError::InvalidInput(
                "Concurrency must be greater than 0".into(),
            ));
        }
        config.concurrent_downloads = concurrency;
    }
    if sub.get_one::<bool>("reject_html").copied().unwrap_or(false) {
        config.reject_html = true;
    }
    Ok(config)
}

/// Registry shown by `list`: the TOML file's sheets when `--config` is given.
pub fn registry_for_list(sub: &ArgMatches) -> AppResult<Vec<SheetSource>> {
    match sub.get_one::<PathBuf>("config") {
        Some(path) => Ok(ResolvedConfigFile::from_toml_file(path)?.sheets),
        None => Ok(default_registry()),
    }
}

async fn run_workflow(registry: &[SheetSource], config: &ResolvedConfig) -> AppResult<BatchSummary> {
    validate_registry(registry)?;

    let client = build_client()?;

    ui::print_header();
    let summary = run_batch(&client, registry, config, ui::print_entry).await?;
    ui::print_summary(&summary);

    info!(
        downloaded = summary.succeeded(),
        total = summary.total(),
        "All sheets processed"
    );

    Ok(summary)
}

fn build_client() -> AppResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// One line per registry entry: label, sheet ID (or `<unresolved>`) and target file.
pub fn render_registry(registry: &[SheetSource]) -> Vec<String> {
    registry
        .iter()
        .map(|source| {
            let id = extract_sheet_id(&source.url).unwrap_or_else(|| "<unresolved>".to_string());
            format!(
                "{}\t{}\tgid={}\t{}",
                source.label,
                id,
                source.gid,
                contacts_filename(&source.label)
            )
        })
        .collect()
}
