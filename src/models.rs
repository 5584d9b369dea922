//! Data models for normalized announcements and the aggregate snapshot.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`NewsItem`]: one normalized vendor announcement
//! - [`Snapshot`]: the per-run aggregate handed to the output boundary
//! - [`VendorMap`]: the ordered vendor-key → items mapping inside a snapshot
//!
//! The serialized field names (`date`, `category`, `cat_label`, `tag`,
//! `updated`, `clouds`) are a stable contract with the dashboard consuming
//! the JSON; renaming any of them is a breaking change.

use crate::category::Category;
use crate::utils::link_slug;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One normalized "what's new" announcement.
///
/// Constructed once by a source adapter and never mutated afterwards. The
/// cleaning, classification, and date normalization all happen before
/// construction, so a `NewsItem` always carries a non-empty title, a
/// `YYYY-MM-DD` sort key, and exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Cleaned title, at most 120 characters, vendor prefix stripped.
    pub title: String,
    /// Absolute URL of the announcement; may be empty for feed entries
    /// published without a link.
    pub link: String,
    /// Cleaned summary, at most 200 characters, may be empty.
    pub summary: String,
    /// Localized long-form date, e.g. `2026年2月20日`.
    #[serde(rename = "date")]
    pub date_display: String,
    /// Canonical `YYYY-MM-DD` used for ordering and identity fallback.
    pub date_iso: String,
    /// Topic tag, serialized as `ai-tag`, `security-tag`, ...
    #[serde(rename = "category")]
    pub category_tag: Category,
    /// Display label derived 1:1 from the category tag.
    #[serde(rename = "cat_label")]
    pub category_label: String,
    /// Uppercase short vendor code (`AZURE`, `AWS`, `GCP`, `OCI`).
    #[serde(rename = "tag")]
    pub vendor_tag: String,
}

impl NewsItem {
    /// Dedup identity: the link slug, falling back to date + title for
    /// entries published without a link. Identity is only compared within a
    /// single vendor's merge, never across vendors.
    pub fn identity_key(&self) -> String {
        link_slug(&self.link).unwrap_or_else(|| format!("{}#{}", self.date_iso, self.title))
    }
}

/// Ordered vendor-key → announcements mapping.
///
/// Serializes as a JSON object whose keys appear in insertion order; the
/// dashboard relies on the configured vendor order (azure, aws, gcp, oci),
/// so an alphabetically-sorting map type would silently break it.
#[derive(Debug, Default)]
pub struct VendorMap(Vec<(String, Vec<NewsItem>)>);

impl VendorMap {
    pub fn insert(&mut self, key: String, items: Vec<NewsItem>) {
        self.0.push((key, items));
    }

    pub fn get(&self, key: &str) -> Option<&[NewsItem]> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NewsItem])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for VendorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, items) in &self.0 {
            map.serialize_entry(key, items)?;
        }
        map.end()
    }
}

/// The root aggregate produced by one pipeline run.
///
/// Write-once: assembled, serialized, and handed to the output boundary.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    /// Localized run timestamp, e.g. `2026年02月20日 14:05 JST`.
    pub updated: String,
    /// Per-vendor announcement lists, each sorted by `date_iso` descending.
    pub clouds: VendorMap,
}
