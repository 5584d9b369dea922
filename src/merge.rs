//! Cross-source reconciliation for a vendor with an unreliable primary feed.
//!
//! The primary feed's results are checked for staleness first; only a stale
//! (or empty) primary triggers the secondary source, so the scrape cost is
//! paid exactly when the feed has gone quiet. Merged results are deduplicated
//! by link slug, keeping the later-dated item per slug.

use crate::models::NewsItem;
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info, warn};

/// Age in days of a result set's most recent item relative to `today`.
///
/// An empty set, or one whose latest `date_iso` does not parse, counts as
/// maximally stale so the caller falls through to its secondary source.
pub fn staleness_days(items: &[NewsItem], today: NaiveDate) -> i64 {
    match items
        .first()
        .and_then(|item| NaiveDate::parse_from_str(&item.date_iso, "%Y-%m-%d").ok())
    {
        Some(latest) => (today - latest).num_days(),
        None => i64::MAX,
    }
}

/// Merge two result sets, deduplicating by announcement identity.
///
/// On a slug collision the item with the greater `date_iso` survives. The
/// flattened set is sorted by `date_iso` descending and capped at `cap`.
pub fn merge_by_slug(
    primary: Vec<NewsItem>,
    secondary: Vec<NewsItem>,
    cap: usize,
) -> Vec<NewsItem> {
    let mut by_slug: HashMap<String, NewsItem> = HashMap::new();
    for item in primary.into_iter().chain(secondary) {
        match by_slug.entry(item.identity_key()) {
            Entry::Occupied(mut slot) => {
                if item.date_iso > slot.get().date_iso {
                    slot.insert(item);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
        }
    }

    let mut merged: Vec<NewsItem> = by_slug.into_values().collect();
    merged.sort_by(|a, b| b.date_iso.cmp(&a.date_iso));
    merged.truncate(cap);
    merged
}

/// Reconcile primary results with a lazily-invoked secondary source.
///
/// A fresh primary (latest item within `stale_after_days` of `today`) is
/// returned as-is, capped; the secondary fetch never runs. A stale or empty
/// primary triggers the secondary fetch, and the two sets are merged by slug.
pub async fn reconcile<F, Fut>(
    primary: Vec<NewsItem>,
    fetch_secondary: F,
    today: NaiveDate,
    stale_after_days: i64,
    cap: usize,
) -> Vec<NewsItem>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Vec<NewsItem>>,
{
    let age = staleness_days(&primary, today);
    if age <= stale_after_days {
        debug!(age_days = age, "Primary feed is fresh; skipping secondary source");
        let mut fresh = primary;
        fresh.truncate(cap);
        return fresh;
    }

    if age == i64::MAX {
        warn!("Primary feed empty or undatable; consulting secondary source");
    } else {
        info!(age_days = age, "Primary feed is stale; consulting secondary source");
    }
    let secondary = fetch_secondary().await;
    debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        "Merging primary and secondary results"
    );
    merge_by_slug(primary, secondary, cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use std::collections::HashSet;

    fn item(link: &str, date_iso: &str) -> NewsItem {
        NewsItem {
            title: format!("Update {link}"),
            link: link.to_string(),
            summary: String::new(),
            date_display: String::new(),
            date_iso: date_iso.to_string(),
            category_tag: Category::Compute,
            category_label: Category::Compute.label().to_string(),
            vendor_tag: "OCI".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_staleness_of_empty_set_is_maximal() {
        assert_eq!(staleness_days(&[], today()), i64::MAX);
    }

    #[test]
    fn test_staleness_of_undatable_latest_is_maximal() {
        let items = vec![item("https://x/a", "garbage")];
        assert_eq!(staleness_days(&items, today()), i64::MAX);
    }

    #[test]
    fn test_staleness_counts_days_from_latest() {
        let items = vec![
            item("https://x/a", "2026-02-19"),
            item("https://x/b", "2026-02-01"),
        ];
        assert_eq!(staleness_days(&items, today()), 10);
    }

    #[tokio::test]
    async fn test_fresh_primary_skips_secondary() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let primary = vec![item("https://x/a", "2026-02-27")];
        let called = AtomicBool::new(false);
        let merged = reconcile(
            primary.clone(),
            || {
                called.store(true, Ordering::Relaxed);
                async { Vec::new() }
            },
            today(),
            7,
            6,
        )
        .await;
        assert_eq!(merged, primary);
        assert!(
            !called.load(Ordering::Relaxed),
            "secondary source must not be invoked for a fresh primary"
        );
    }

    #[tokio::test]
    async fn test_stale_primary_invokes_secondary_and_merges() {
        // latest primary item is 10 days old
        let primary = vec![
            item("https://x/feed-only", "2026-02-19"),
            item("https://x/shared", "2026-02-10"),
        ];
        let secondary = vec![
            item("https://x/scraped-only", "2026-02-26"),
            item("https://x/shared/", "2026-02-24"),
        ];

        let merged = reconcile(primary, || async move { secondary }, today(), 7, 6).await;

        let slugs: HashSet<String> = merged.iter().map(|i| i.identity_key()).collect();
        assert_eq!(merged.len(), 3);
        assert_eq!(
            slugs,
            HashSet::from([
                "feed-only".to_string(),
                "shared".to_string(),
                "scraped-only".to_string()
            ])
        );
        // slug collision resolved to the later date
        let shared = merged.iter().find(|i| i.identity_key() == "shared").unwrap();
        assert_eq!(shared.date_iso, "2026-02-24");
    }

    #[tokio::test]
    async fn test_empty_primary_forces_secondary() {
        let secondary = vec![item("https://x/a", "2026-02-28")];
        let merged = reconcile(Vec::new(), || async move { secondary }, today(), 7, 6).await;
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_merge_dedups_trailing_slash_variants() {
        let merged = merge_by_slug(
            vec![item("https://x/updates/foo-bar/", "2026-02-20")],
            vec![item("https://x/updates/foo-bar", "2026-02-22")],
            6,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date_iso, "2026-02-22");
    }

    #[test]
    fn test_merge_sorts_descending_and_caps() {
        let primary: Vec<NewsItem> = (1..=9)
            .map(|d| item(&format!("https://x/p{d}"), &format!("2026-02-0{d}")))
            .collect();
        let merged = merge_by_slug(primary, Vec::new(), 6);

        assert_eq!(merged.len(), 6);
        for pair in merged.windows(2) {
            assert!(pair[0].date_iso >= pair[1].date_iso);
        }
        assert_eq!(merged[0].date_iso, "2026-02-09");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = vec![
            item("https://x/one", "2026-02-20"),
            item("https://x/two", "2026-02-18"),
        ];
        let b = vec![
            item("https://x/two/", "2026-02-19"),
            item("https://x/three", "2026-02-15"),
        ];

        let once = merge_by_slug(a, b, 6);
        let twice = merge_by_slug(once.clone(), Vec::new(), 6);
        assert_eq!(once, twice);

        let slugs: Vec<String> = once.iter().map(|i| i.identity_key()).collect();
        let unique: HashSet<&String> = slugs.iter().collect();
        assert_eq!(slugs.len(), unique.len(), "no duplicate slugs survive");
    }
}
