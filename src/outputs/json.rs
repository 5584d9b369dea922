//! JSON snapshot output.
//!
//! Serializes the assembled [`Snapshot`] to `{output_dir}/news.json`,
//! pretty-printed with 2-space indentation for the dashboard that loads it
//! directly. This is the pipeline's only persistent artifact and the only
//! place a failure is fatal to the run.

use crate::models::Snapshot;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Snapshot`] to `{output_dir}/news.json`.
///
/// Creates the output directory first. Returns an error if directory
/// creation, serialization, or the file write fails.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_snapshot(snapshot: &Snapshot, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(snapshot)?;

    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = format!("{}/news.json", output_dir.trim_end_matches('/'));
    info!(path = %path, "Writing snapshot JSON");
    fs::write(&path, json).await?;
    info!(path = %path, "Wrote snapshot JSON");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VendorMap;

    #[tokio::test]
    async fn test_write_snapshot_roundtrip() {
        let dir = std::env::temp_dir().join("cloud_whatsnew_json_test");
        let dir = dir.to_str().unwrap();

        let mut clouds = VendorMap::default();
        clouds.insert("azure".to_string(), Vec::new());
        clouds.insert("aws".to_string(), Vec::new());
        let snapshot = Snapshot {
            updated: "2026年02月20日 14:05 JST".to_string(),
            clouds,
        };

        write_snapshot(&snapshot, dir).await.unwrap();

        let written = tokio::fs::read_to_string(format!("{dir}/news.json"))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["updated"], "2026年02月20日 14:05 JST");
        assert!(value["clouds"]["azure"].is_array());

        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}
