//! Google Cloud release-notes scraper.
//!
//! GCP publishes no usable feed for the aggregated release-notes page, so
//! this adapter scrapes the HTML listing. The page interleaves date headings
//! with anchors to individual notes; candidates are collected by walking
//! headings and anchors in document order, attributing each anchor to the
//! most recent date heading above it. Anchors with no date heading in scope,
//! a too-short label, or an unresolvable link are discarded one by one.

use crate::category::CategoryRule;
use crate::config::{Limits, VendorConfig};
use crate::dates;
use crate::fetch;
use crate::models::NewsItem;
use crate::utils::clean_text;
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};
use url::Url;

/// Fetch GCP release notes by scraping the listing page.
#[instrument(level = "info", skip_all, fields(vendor = vendor.key))]
pub async fn fetch_updates(
    vendor: &VendorConfig,
    limits: &Limits,
    rules: &[CategoryRule],
) -> Vec<NewsItem> {
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

    let mut items = items_from_listing(&html, &base, vendor, rules, dates::now_jst());
    super::sort_and_cap(&mut items, limits.max_items_per_cloud);
    info!(count = items.len(), "GCP release notes ready");
    items
}

/// Extract candidate items from the release-notes listing document.
///
/// Walks `h2`/`h3` headings and anchors in document order. A heading whose
/// text parses as a date opens a dated segment; any other heading closes it.
/// Anchors inside a dated segment become candidates.
pub(crate) fn items_from_listing(
    html: &str,
    base: &Url,
    vendor: &VendorConfig,
    rules: &[CategoryRule],
    now: DateTime<FixedOffset>,
) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let walk = Selector::parse("h2, h3, a[href]").unwrap();
    let tag = vendor.tag();

    let mut current_date: Option<String> = None;
    let mut items = Vec::new();
    for element in document.select(&walk) {
        if element.value().name() != "a" {
            let heading = element.text().collect::<Vec<_>>().join(" ");
            current_date = dates::parse_text_date(&heading).map(|_| heading.trim().to_string());
            continue;
        }

        let Some(date_text) = current_date.as_deref() else {
            continue;
        };
        let Some(href) = element.value().attr("href") else {
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
        let title = clean_text(&element.text().collect::<Vec<_>>().join(" "), super::TITLE_MAX_LEN);
        if title.chars().count() < super::MIN_SCRAPED_TITLE_LEN {
            continue;
        }

        items.push(super::build_item(
            &title,
            "",
            link.to_string(),
            None,
            Some(date_text),
            rules,
            &tag,
            now,
        ));
    }

    items
        .into_iter()
        .unique_by(|item| item.link.clone())
        .collect()
}
