//! CalLink Scraper CLI
//!
//! Local execution entry point for the UC Berkeley CalLink directory scraper.

use std::path::PathBuf;

use callink_scraper::{config::Config, error::Result, models::Progress, pipeline};
use clap::{Parser, Subcommand};

/// CalLink - UC Berkeley organization directory scraper
#[derive(Parser, Debug)]
#[command(
    name = "callink-scraper",
    version,
    about = "Scrapes the UC Berkeley CalLink organization directory"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the directory: list, enrich, persist, aggregate
    Scrape {
        /// Number of concurrent enrichment workers
        #[arg(long)]
        workers: Option<usize>,

        /// Resume from the progress checkpoint
        #[arg(long)]
        resume: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show checkpoint progress
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("CalLink scraper starting...");

    let mut config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Scrape { workers, resume } => {
            if let Some(workers) = workers {
                config.crawler.workers = workers;
            }
            config.validate()?;

            log::info!(
                "Scraping {} with {} workers",
                config.api.site_url,
                config.crawler.workers
            );

            let report = pipeline::run_scraper(&config, resume).await?;
            log::info!(
                "Scrape complete: {} listed, {} enriched, {} degraded, {} saved, {} aggregated",
                report.listed,
                report.enriched,
                report.degraded,
                report.persisted,
                report.aggregated
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            let aggregate_path = config.paths.aggregate_path();
            log::info!(
                "Aggregate dataset: {}",
                if aggregate_path.exists() {
                    "exists"
                } else {
                    "not found"
                }
            );

            let progress_path = &config.paths.progress_file;
            match std::fs::read_to_string(progress_path) {
                Ok(content) => match serde_json::from_str::<Progress>(&content) {
                    Ok(progress) => {
                        log::info!(
                            "Progress: {}/{} organizations scraped",
                            progress.scraped_orgs,
                            progress.total_orgs
                        );
                        log::info!("Completed pages: {}", progress.completed_pages.len());
                        if let Some(updated) = progress.last_updated {
                            log::info!("Last updated: {}", updated);
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "Checkpoint at {} is unreadable: {}",
                            progress_path.display(),
                            e
                        );
                    }
                },
                Err(_) => {
                    log::info!("No checkpoint found at {}", progress_path.display());
                }
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
