//! Amazon Web Services "What's New" feed adapter.
//!
//! The Japanese edition feed is preferred; the global feed serves as the
//! fallback. No vendor-specific preprocessing is needed beyond the shared
//! normalization pipeline.

use crate::category::CategoryRule;
use crate::config::{Limits, VendorConfig};
use crate::dates;
use crate::models::NewsItem;
use tracing::{info, instrument};

/// Fetch AWS announcements through the configured feed fallback chain.
#[instrument(level = "info", skip_all, fields(vendor = vendor.key))]
pub async fn fetch_updates(
    vendor: &VendorConfig,
    limits: &Limits,
    rules: &[CategoryRule],
) -> Vec<NewsItem> {
    let entries = super::feed_entries_with_fallback(vendor, limits.max_fetch_entries).await;
    let mut items = super::items_from_entries(entries, vendor, rules, dates::now_jst());
    super::sort_and_cap(&mut items, limits.max_items_per_cloud);
    info!(count = items.len(), "AWS announcements ready");
    items
}
