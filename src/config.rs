//! Startup configuration: the vendor table and pipeline limits.
//!
//! Both structures are constructed once at startup and passed into the
//! components that need them; there is no process-wide mutable state. The
//! vendor table mirrors the official "what's new" pages of the four covered
//! clouds; each entry carries an explicit, ordered feed fallback list and,
//! where the vendor has no usable feed, the HTML listing page to scrape.

/// One configured cloud vendor.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    /// Stable lowercase key; also the JSON object key in the snapshot.
    pub key: &'static str,
    /// Human-readable vendor name, used for logging only.
    pub name: &'static str,
    /// Feed URLs tried strictly in order; first source with a usable entry
    /// wins. Empty for scrape-only vendors.
    pub feed_urls: &'static [&'static str],
    /// HTML listing page for scrape-capable vendors.
    pub listing_url: Option<&'static str>,
}

impl VendorConfig {
    /// Uppercase short code stamped on every item, e.g. `AZURE`.
    pub fn tag(&self) -> String {
        self.key.to_uppercase()
    }
}

/// Tunable pipeline limits. All three are overridable from the CLI.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Final number of items kept per vendor.
    pub max_items_per_cloud: usize,
    /// Raw feed entries considered per source, bounding work on huge feeds.
    pub max_fetch_entries: usize,
    /// Age in days past which a primary feed counts as stale and the
    /// secondary source is consulted.
    pub stale_after_days: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_items_per_cloud: 6,
            max_fetch_entries: 100,
            stale_after_days: 7,
        }
    }
}

/// The four covered vendors, in snapshot output order.
pub static VENDORS: &[VendorConfig] = &[
    VendorConfig {
        key: "azure",
        name: "Microsoft Azure",
        feed_urls: &[
            "https://azure.microsoft.com/ja-jp/updates/feed/",
            "https://azurecomcdn.azureedge.net/ja-jp/updates/feed/",
        ],
        listing_url: None,
    },
    VendorConfig {
        key: "aws",
        name: "Amazon Web Services",
        feed_urls: &[
            "https://aws.amazon.com/jp/new/feed/",
            "https://aws.amazon.com/new/feed/",
        ],
        listing_url: None,
    },
    VendorConfig {
        key: "gcp",
        name: "Google Cloud Platform",
        feed_urls: &[],
        listing_url: Some("https://docs.cloud.google.com/release-notes"),
    },
    VendorConfig {
        key: "oci",
        name: "Oracle Cloud Infrastructure",
        feed_urls: &["https://docs.oracle.com/en-us/iaas/releasenotes/rss/whatsnew.xml"],
        listing_url: Some("https://docs.oracle.com/en-us/iaas/releasenotes/"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_order_matches_snapshot_contract() {
        let keys: Vec<&str> = VENDORS.iter().map(|v| v.key).collect();
        assert_eq!(keys, ["azure", "aws", "gcp", "oci"]);
    }

    #[test]
    fn test_vendor_tags_are_uppercase_keys() {
        for vendor in VENDORS {
            assert_eq!(vendor.tag(), vendor.key.to_uppercase());
        }
    }

    #[test]
    fn test_every_vendor_has_a_source() {
        for vendor in VENDORS {
            assert!(
                !vendor.feed_urls.is_empty() || vendor.listing_url.is_some(),
                "vendor {} has no source",
                vendor.key
            );
        }
    }

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_items_per_cloud, 6);
        assert_eq!(limits.max_fetch_entries, 100);
        assert_eq!(limits.stale_after_days, 7);
    }
}
