//! CLI entry point for the bulk downloader.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cms_bulk::{Coordinator, RunConfig};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Bulk download starting");

    let config = RunConfig {
        catalog_url: args.catalog_url,
        api_base: args.api_base,
        output_dir: args.output_dir,
        delay: Duration::from_secs_f64(args.delay),
        page_size: args.page_size,
        latest_only: !args.all_versions,
    };

    let coordinator = Coordinator::new(config);
    let report = coordinator.run().await?;

    info!(
        datasets = report.stats.datasets_processed(),
        downloaded = report.stats.files_downloaded(),
        skipped = report.stats.files_skipped(),
        errors = report.stats.errors(),
        total_bytes = report.stats.total_bytes(),
        elapsed_secs = report.elapsed.as_secs_f64(),
        "Run complete"
    );

    Ok(())
}
