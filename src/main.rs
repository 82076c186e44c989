//! Imovel-Radar main entry point
//!
//! This is the command-line interface for the Imovel-Radar property crawler.

use anyhow::Context;
use clap::{Parser, Subcommand};
use imovel_radar::config::{load_config_or_default, Config};
use imovel_radar::crawler::run_crawl;
use imovel_radar::output::save_records;
use imovel_radar::report::generate_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Imovel-Radar: a classifieds property crawler
///
/// Imovel-Radar walks the configured real-estate listing page by page,
/// extracts one record per ad and persists the collection as JSON and CSV.
/// The report command turns the persisted JSON into an HTML dashboard.
#[derive(Parser, Debug)]
#[command(name = "imovel-radar")]
#[command(version)]
#[command(about = "A classifieds property crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the crawl and persist the collected records
    Crawl,

    /// Generate the HTML dashboard from previously persisted records
    Report,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Command::Crawl => handle_crawl(config).await,
        Command::Report => handle_report(config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("imovel_radar=info,warn"),
            1 => EnvFilter::new("imovel_radar=debug,info"),
            2 => EnvFilter::new("imovel_radar=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl command
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} (up to {} pages, {} ms between ads)",
        config.crawler.listing_url,
        config.crawler.max_pages,
        config.crawler.ad_delay_ms
    );

    let records = run_crawl(config.clone()).await?;

    save_records(&records, &config.output).context("Failed to persist records")?;

    println!("Saved {} ads to {}", records.len(), config.output.data_dir);

    Ok(())
}

/// Handles the report command
fn handle_report(config: Config) -> anyhow::Result<()> {
    let path = generate_report(&config.output)?;

    println!("Dashboard saved to {}", path.display());

    Ok(())
}
