//! Oracle Cloud Infrastructure release-notes adapter.
//!
//! OCI's what's-new feed goes quiet for weeks at a time while the HTML
//! release-notes listing keeps updating, so this adapter reconciles the two:
//! the feed is the primary source, and when its freshest item is older than
//! the staleness threshold the listing page is scraped and merged in by link
//! slug. A fresh feed never triggers the scrape.
//!
//! The listing is block-structured: each row holds one anchor plus a nearby
//! `"Month D, YYYY"` date marker. Rows missing either are discarded alone.

use crate::category::CategoryRule;
use crate::config::{Limits, VendorConfig};
use crate::dates;
use crate::fetch;
use crate::merge;
use crate::models::NewsItem;
use crate::utils::clean_text;
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};
use url::Url;

/// Fetch OCI release notes, reconciling the feed with the listing page.
#[instrument(level = "info", skip_all, fields(vendor = vendor.key))]
pub async fn fetch_updates(
    vendor: &VendorConfig,
    limits: &Limits,
    rules: &[CategoryRule],
) -> Vec<NewsItem> {
    let entries = super::feed_entries_with_fallback(vendor, limits.max_fetch_entries).await;
    let now = dates::now_jst();
    let mut primary = super::items_from_entries(entries, vendor, rules, now);
    primary.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));

    let items = merge::reconcile(
        primary,
        || scrape_listing(vendor, rules),
        now.date_naive(),
        limits.stale_after_days,
        limits.max_items_per_cloud,
    )
    .await;
    info!(count = items.len(), "OCI release notes ready");
    items
}

/// Scrape the release-notes listing page; empty on any failure.
async fn scrape_listing(vendor: &VendorConfig, rules: &[CategoryRule]) -> Vec<NewsItem> {
    let Some(url) = vendor.listing_url else {
        warn!(vendor = vendor.key, "No listing page configured");
        return Vec::new();
    };
    let html = match fetch::get_text(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(vendor = vendor.key, %url, error = %e, "Listing fetch failed");
            return Vec::new();
        }
    };
    let base = match Url::parse(url) {
        Ok(base) => base,
        Err(e) => {
            warn!(vendor = vendor.key, %url, error = %e, "Listing URL invalid");
            return Vec::new();
        }
    };
    items_from_listing(&html, &base, vendor, rules, dates::now_jst())
}

/// Extract candidate items from the listing document.
///
/// Each `li`/`tr` block must contain an anchor of minimum label length and a
/// prose date marker somewhere in its text.
pub(crate) fn items_from_listing(
    html: &str,
    base: &Url,
    vendor: &VendorConfig,
    rules: &[CategoryRule],
    now: DateTime<FixedOffset>,
) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let block_sel = Selector::parse("li, tr").unwrap();
    let anchor_sel = Selector::parse("a[href]").unwrap();
    let tag = vendor.tag();

    let mut items = Vec::new();
    for block in document.select(&block_sel) {
        let block_text = block.text().collect::<Vec<_>>().join(" ");
        let Some(date) = dates::parse_text_date(&block_text) else {
            continue;
        };
        let date_iso = date.format("%Y-%m-%d").to_string();

        for anchor in block.select(&anchor_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.starts_with('#') {
                continue;
            }
            let Ok(link) = base.join(href) else {
                continue;
            };
            if !matches!(link.scheme(), "http" | "https") {
                continue;
            }
            let title =
                clean_text(&anchor.text().collect::<Vec<_>>().join(" "), super::TITLE_MAX_LEN);
            if title.chars().count() < super::MIN_SCRAPED_TITLE_LEN {
                continue;
            }

            items.push(super::build_item(
                &title,
                "",
                link.to_string(),
                None,
                Some(&date_iso),
                rules,
                &tag,
                now,
            ));
            break; // one candidate per block
        }
    }

    items
        .into_iter()
        .unique_by(|item| item.link.clone())
        .collect()
}
