//! Command-line interface definitions for the cloud news pipeline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The tunable limits can also be provided via environment variables.

use crate::config::Limits;
use clap::Parser;

/// Command-line arguments for the snapshot pipeline.
///
/// # Examples
///
/// ```sh
/// # Default run, writing data/news.json
/// cloud_whatsnew
///
/// # Custom output directory and a deeper per-vendor cap
/// cloud_whatsnew -o ./public/data --max-items 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the snapshot JSON file
    #[arg(short, long, default_value = "data")]
    pub output_dir: String,

    /// Number of items kept per cloud vendor
    #[arg(long, env = "MAX_ITEMS_PER_CLOUD", default_value_t = 6)]
    pub max_items: usize,

    /// Maximum raw feed entries scanned per source
    #[arg(long, env = "MAX_FETCH_ENTRIES", default_value_t = 100)]
    pub scan_limit: usize,

    /// Age in days past which a primary feed counts as stale
    #[arg(long, env = "STALE_AFTER_DAYS", default_value_t = 7)]
    pub stale_after_days: i64,
}

impl Cli {
    /// Collect the tunable limits into the struct handed to the pipeline.
    pub fn limits(&self) -> Limits {
        Limits {
            max_items_per_cloud: self.max_items,
            max_fetch_entries: self.scan_limit,
            stale_after_days: self.stale_after_days,
        }
    }
}
