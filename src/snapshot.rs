//! Snapshot assembly: one run, all vendors, one aggregate.
//!
//! Vendor fetches share no mutable state, so they run concurrently; results
//! land in the vendor map in configured table order regardless of completion
//! order. A vendor whose sources all failed still appears with an empty
//! list, so the dashboard always sees every configured vendor key.

use crate::category::CategoryRule;
use crate::config::{Limits, VendorConfig};
use crate::dates;
use crate::models::{NewsItem, Snapshot, VendorMap};
use crate::sources;
use futures::future;
use tracing::{info, instrument, warn};

/// Run every configured vendor adapter and assemble the snapshot.
#[instrument(level = "info", skip_all)]
pub async fn build_snapshot(
    vendors: &[VendorConfig],
    limits: &Limits,
    rules: &[CategoryRule],
) -> Snapshot {
    let fetches = vendors.iter().map(|vendor| fetch_vendor(vendor, limits, rules));
    let results = future::join_all(fetches).await;

    let mut clouds = VendorMap::default();
    for (vendor, items) in vendors.iter().zip(results) {
        info!(
            vendor = vendor.key,
            name = vendor.name,
            count = items.len(),
            "Vendor collected"
        );
        clouds.insert(vendor.key.to_string(), items);
    }

    Snapshot {
        updated: dates::run_stamp(dates::now_jst()),
        clouds,
    }
}

/// Dispatch one vendor to its adapter. Never fails; a vendor with no
/// registered adapter just contributes an empty list.
async fn fetch_vendor(
    vendor: &VendorConfig,
    limits: &Limits,
    rules: &[CategoryRule],
) -> Vec<NewsItem> {
    match vendor.key {
        "azure" => sources::azure::fetch_updates(vendor, limits, rules).await,
        "aws" => sources::aws::fetch_updates(vendor, limits, rules).await,
        "gcp" => sources::gcp::fetch_updates(vendor, limits, rules).await,
        "oci" => sources::oci::fetch_updates(vendor, limits, rules).await,
        other => {
            warn!(vendor = other, "No adapter registered for vendor");
            Vec::new()
        }
    }
}
