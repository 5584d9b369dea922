//! Microsoft Azure updates feed adapter.
//!
//! Azure's update titles carry a bracketed rollout status (`[In preview]`,
//! `[Generally available]`, ...) that is stripped before cleaning, and links
//! occasionally point at the `en-us` locale even on the Japanese feed, so
//! they are canonicalized to the `ja-jp` path the dashboard links into.

use crate::category::CategoryRule;
use crate::config::{Limits, VendorConfig};
use crate::dates;
use crate::feed::FeedEntry;
use crate::models::NewsItem;
use crate::utils::strip_status_prefix;
use chrono::{DateTime, FixedOffset};
use tracing::{info, instrument};

/// Fetch Azure updates through the configured feed fallback chain.
#[instrument(level = "info", skip_all, fields(vendor = vendor.key))]
pub async fn fetch_updates(
    vendor: &VendorConfig,
    limits: &Limits,
    rules: &[CategoryRule],
) -> Vec<NewsItem> {
    let entries = super::feed_entries_with_fallback(vendor, limits.max_fetch_entries).await;
    let mut items = items_from_entries(entries, vendor, rules, dates::now_jst());
    super::sort_and_cap(&mut items, limits.max_items_per_cloud);
    info!(count = items.len(), "Azure updates ready");
    items
}

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
            let title_raw = entry.title.as_deref().unwrap_or(super::DEFAULT_TITLE);
            let link = canonical_locale_link(entry.link.as_deref().unwrap_or(""));
            super::build_item(
                strip_status_prefix(title_raw),
                entry.summary.as_deref().unwrap_or(""),
                link,
                entry.timestamp,
                entry.raw_date.as_deref(),
                rules,
                &tag,
                now,
            )
        })
        .collect()
}

/// Rewrite `en-us` locale paths to the `ja-jp` edition.
pub(crate) fn canonical_locale_link(link: &str) -> String {
    link.replace("/en-us/", "/ja-jp/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, DEFAULT_RULES};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<FixedOffset> {
        dates::jst().with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn azure_vendor() -> &'static VendorConfig {
        &crate::config::VENDORS[0]
    }

    #[test]
    fn test_status_prefix_is_stripped_and_classified() {
        let entry = FeedEntry {
            title: Some("[In preview] New GPU VM size".to_string()),
            summary: None,
            link: Some("https://azure.microsoft.com/ja-jp/updates/gpu-vm/".to_string()),
            timestamp: None,
            raw_date: Some("2026-02-20T00:00:00Z".to_string()),
        };

        let items = items_from_entries(vec![entry], azure_vendor(), DEFAULT_RULES, fixed_now());
        assert_eq!(items[0].title, "New GPU VM size");
        assert_eq!(items[0].category_tag, Category::Compute);
        assert_eq!(items[0].vendor_tag, "AZURE");
    }

    #[test]
    fn test_links_canonicalized_to_ja_jp() {
        assert_eq!(
            canonical_locale_link("https://azure.microsoft.com/en-us/updates/foo/"),
            "https://azure.microsoft.com/ja-jp/updates/foo/"
        );
        assert_eq!(
            canonical_locale_link("https://azure.microsoft.com/ja-jp/updates/foo/"),
            "https://azure.microsoft.com/ja-jp/updates/foo/"
        );
    }
}
