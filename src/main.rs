//! # Cloud What's New
//!
//! An aggregation pipeline that collects "what's new" announcements from the
//! four major cloud vendors, normalizes them into a common record shape, and
//! writes a single JSON snapshot for a dashboard to display.
//!
//! ## Features
//!
//! - Pulls Azure and AWS announcements from their official feeds, with a
//!   fallback feed per vendor
//! - Scrapes the GCP release-notes listing, which has no usable feed
//! - Reconciles OCI's unreliable feed with its release-notes page, scraping
//!   only when the feed has gone stale
//! - Classifies every announcement into one of seven topic categories and
//!   normalizes all dates to JST
//!
//! ## Usage
//!
//! ```sh
//! cloud_whatsnew -o ./data
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Each vendor adapter pulls from its sources, falling back
//!    in configured order (feed → fallback feed, or feed → scrape)
//! 2. **Normalization**: Titles and summaries are cleaned, dates normalized,
//!    categories assigned
//! 3. **Assembly**: Per-vendor lists are collected into one snapshot
//! 4. **Output**: The snapshot is written as `news.json`

use clap::Parser;
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod category;
mod cli;
mod config;
mod dates;
mod feed;
mod fetch;
mod merge;
mod models;
mod outputs;
mod snapshot;
mod sources;
mod utils;

use cli::Cli;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("cloud_whatsnew starting up");

    // Parse CLI
    let args = Cli::parse();
    let limits = args.limits();
    info!(?limits, output_dir = %args.output_dir, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before any fetching
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Fetch and assemble ----
    let news = snapshot::build_snapshot(config::VENDORS, &limits, category::DEFAULT_RULES).await;

    let total: usize = news.clouds.iter().map(|(_, items)| items.len()).sum();
    info!(
        vendors = news.clouds.len(),
        total_items = total,
        updated = %news.updated,
        "Snapshot assembled"
    );

    // ---- Write output ----
    if let Err(e) = outputs::json::write_snapshot(&news, &args.output_dir).await {
        error!(error = %e, "Failed to write snapshot JSON");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
