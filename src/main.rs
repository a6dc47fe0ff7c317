//! dex-harvest main entry point
//!
//! This is the command-line interface for the dex-harvest detail harvester.

use clap::Parser;
use dex_harvest::config::{load_config_with_hash, validate, Config};
use dex_harvest::harvest::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// dex-harvest: concurrent detail harvester
///
/// Walks a paginated listing endpoint, fetches every discovered detail
/// record with a fixed pool of workers, and writes the results to CSV.
#[derive(Parser, Debug)]
#[command(name = "dex-harvest")]
#[command(version)]
#[command(about = "Concurrent detail harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    handle_harvest(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dex_harvest=info,warn"),
            1 => EnvFilter::new("dex_harvest=debug,info"),
            2 => EnvFilter::new("dex_harvest=trace,debug"),
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

/// Handles the --dry-run mode: prints what a run would do
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    validate(config)?;

    println!("=== dex-harvest Dry Run ===\n");

    println!("Source:");
    println!("  Listing URL: {}", config.source.listing_url);
    println!("  User agent: {}", config.source.user_agent);

    println!("\nHarvest:");
    println!("  Item count: {}", config.harvest.item_count);
    println!("  Worker count: {}", config.harvest.worker_count);
    println!("  Strategy: {}", config.harvest.strategy);

    println!("\nOutput:");
    println!("  CSV path: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    match harvest(config).await {
        Ok(summary) => {
            if !quiet {
                println!("{}", summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
