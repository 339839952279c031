//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Builds the shared HTTP client for the run.
///
/// Redirects are disabled so a 307 from a mirror surfaces as its own status
/// code instead of being followed, and the transport timeout comes from the
/// configuration so tests can force timeout outcomes deterministically.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(Arc::new(client))
}
