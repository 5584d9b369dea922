//! Document retrieval over HTTP.
//!
//! One shared client serves every source: rustls, a bounded timeout so a
//! single unresponsive vendor cannot stall the whole snapshot, and a
//! descriptive User-Agent. Callers treat any failure as "this source is
//! down" and move on to their next fallback.

use once_cell::sync::Lazy;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("cloud_whatsnew/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("HTTP client construction")
});

/// Fetch a document body as text.
///
/// # Errors
///
/// Returns an error on connection failure, timeout, or a non-success status.
#[instrument(level = "debug", skip_all, fields(%url))]
pub async fn get_text(url: &str) -> Result<String, Box<dyn Error>> {
    let response = CLIENT.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!(bytes = body.len(), "Fetched document");
    Ok(body)
}
