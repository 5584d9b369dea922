//! Per-vendor source adapters for cloud "what's new" announcements.
//!
//! This module contains one submodule per covered vendor. Every adapter
//! exposes the same entry point, `fetch_updates`, returning normalized
//! [`NewsItem`]s sorted by date descending and capped at the configured
//! per-vendor limit.
//!
//! # Covered Vendors
//!
//! | Vendor | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Microsoft Azure | [`azure`] | Feed + fallback | Status-prefix stripping, ja-jp links |
//! | Amazon Web Services | [`aws`] | Feed + fallback | Japanese edition feed first |
//! | Google Cloud Platform | [`gcp`] | HTML scraping | Release-notes listing page |
//! | Oracle Cloud Infrastructure | [`oci`] | Feed + scrape reconcile | Primary feed goes quiet for weeks |
//!
//! # Common Patterns
//!
//! - Feed sources are tried strictly in configured order; the first source
//!   yielding at least one usable entry wins and later sources are never
//!   merged in.
//! - Failures at any source are logged and the next fallback tried; an
//!   adapter whose sources are all exhausted returns an empty list, never an
//!   error.
//! - All raw text routes through [`crate::utils::clean_text`], every item is
//!   classified by [`crate::category::classify`], and dates are normalized
//!   to JST by [`crate::dates::normalize`].

pub mod aws;
pub mod azure;
pub mod gcp;
pub mod oci;

use crate::category::{self, CategoryRule};
use crate::config::VendorConfig;
use crate::dates;
use crate::feed::{self, FeedEntry};
use crate::fetch;
use crate::models::NewsItem;
use crate::utils::{clean_text, truncate_for_log};
use chrono::{DateTime, FixedOffset, Utc};
use std::error::Error;
use tracing::{debug, info, warn};

/// Safe default when a feed entry carries no title at all.
pub(crate) const DEFAULT_TITLE: &str = "(タイトルなし)";
/// Character caps applied to every title and summary.
pub(crate) const TITLE_MAX_LEN: usize = 120;
pub(crate) const SUMMARY_MAX_LEN: usize = 200;
/// Scraped candidates with a shorter cleaned title are navigation noise.
pub(crate) const MIN_SCRAPED_TITLE_LEN: usize = 8;

/// Try each configured feed URL in order; first usable source wins.
///
/// A source is usable when it fetches and parses into at least one entry.
/// Entries beyond the scan limit are dropped before normalization to bound
/// work on huge feeds.
pub(crate) async fn feed_entries_with_fallback(
    vendor: &VendorConfig,
    scan_limit: usize,
) -> Vec<FeedEntry> {
    for url in vendor.feed_urls {
        match feed_source(url, scan_limit).await {
            Ok(entries) => {
                info!(
                    vendor = vendor.key,
                    %url,
                    count = entries.len(),
                    "Feed source selected"
                );
                return entries;
            }
            Err(e) => {
                warn!(
                    vendor = vendor.key,
                    %url,
                    error = %e,
                    "Feed source unusable; trying next"
                );
            }
        }
    }
    warn!(vendor = vendor.key, "All feed sources exhausted");
    Vec::new()
}

async fn feed_source(url: &str, scan_limit: usize) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let body = fetch::get_text(url).await?;
    let mut entries = feed::parse_feed(&body).map_err(|e| {
        debug!(preview = %truncate_for_log(&body, 200), "Unparseable feed body");
        e
    })?;
    entries.truncate(scan_limit);
    Ok(entries)
}

/// Build one normalized item from pre-extracted raw fields.
pub(crate) fn build_item(
    title_raw: &str,
    summary_raw: &str,
    link: String,
    timestamp: Option<DateTime<Utc>>,
    raw_date: Option<&str>,
    rules: &[CategoryRule],
    vendor_tag: &str,
    now: DateTime<FixedOffset>,
) -> NewsItem {
    let mut title = clean_text(title_raw, TITLE_MAX_LEN);
    if title.is_empty() {
        title = DEFAULT_TITLE.to_string();
    }
    let summary = clean_text(summary_raw, SUMMARY_MAX_LEN);
    let date = dates::normalize(timestamp, raw_date, now);
    let category = category::classify(rules, &title, &summary);

    NewsItem {
        title,
        link,
        summary,
        date_display: date.display,
        date_iso: date.iso,
        category_tag: category,
        category_label: category.label().to_string(),
        vendor_tag: vendor_tag.to_string(),
    }
}

/// Normalize feed entries without vendor-specific preprocessing.
///
/// Entries missing a link are still included; a missing summary never drops
/// an entry.
pub(crate) fn items_from_entries(
    entries: Vec<FeedEntry>,
    vendor: &VendorConfig,
    rules: &[CategoryRule],
    now: DateTime<FixedOffset>,
) -> Vec<NewsItem> {
    let tag = vendor.tag();
    entries
        .into_iter()
        .map(|entry| {
            build_item(
                entry.title.as_deref().unwrap_or(DEFAULT_TITLE),
                entry.summary.as_deref().unwrap_or(""),
                entry.link.clone().unwrap_or_default(),
                entry.timestamp,
                entry.raw_date.as_deref(),
                rules,
                &tag,
                now,
            )
        })
        .collect()
}

/// Order by `date_iso` descending and apply the per-vendor cap.
pub(crate) fn sort_and_cap(items: &mut Vec<NewsItem>, cap: usize) {
    items.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));
    items.truncate(cap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, DEFAULT_RULES};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<FixedOffset> {
        dates::jst().with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn vendor() -> &'static VendorConfig {
        &crate::config::VENDORS[1] // aws
    }

    fn entry(title: &str, link: Option<&str>, iso: &str) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_string()),
            summary: None,
            link: link.map(str::to_string),
            timestamp: None,
            raw_date: Some(format!("{iso}T00:00:00Z")),
        }
    }

    #[test]
    fn test_items_from_entries_keeps_linkless_and_summaryless() {
        let items = items_from_entries(
            vec![entry("Release without link published today", None, "2026-02-20")],
            vendor(),
            DEFAULT_RULES,
            fixed_now(),
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "");
        assert_eq!(items[0].summary, "");
        assert_eq!(items[0].vendor_tag, "AWS");
    }

    #[test]
    fn test_items_from_entries_defaults_missing_title() {
        let mut e = entry("", Some("https://x/a"), "2026-02-20");
        e.title = None;
        let items = items_from_entries(vec![e], vendor(), DEFAULT_RULES, fixed_now());
        assert_eq!(items[0].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_build_item_normalizes_everything() {
        let item = build_item(
            "<b>Aurora PostgreSQL</b>   update",
            "<p>Faster queries</p>",
            "https://x/aurora".to_string(),
            Some(Utc.with_ymd_and_hms(2026, 2, 20, 1, 0, 0).unwrap()),
            None,
            DEFAULT_RULES,
            "AWS",
            fixed_now(),
        );
        assert_eq!(item.title, "Aurora PostgreSQL update");
        assert_eq!(item.summary, "Faster queries");
        assert_eq!(item.date_iso, "2026-02-20");
        assert_eq!(item.category_tag, Category::Database);
        assert_eq!(item.category_label, "データベース");
    }

    #[test]
    fn test_sort_and_cap() {
        let entries: Vec<FeedEntry> = (10..=20)
            .map(|d| entry(&format!("Update number {d}"), Some("https://x/u"), &format!("2026-02-{d}")))
            .collect();
        let mut items = items_from_entries(entries, vendor(), DEFAULT_RULES, fixed_now());
        sort_and_cap(&mut items, 6);

        assert_eq!(items.len(), 6);
        assert_eq!(items[0].date_iso, "2026-02-20");
        for pair in items.windows(2) {
            assert!(pair[0].date_iso >= pair[1].date_iso);
        }
    }
}
