// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::CrawlerConfig;
use crate::error::Result;

/// Create the shared HTTP client with identity, timeout, and pool tuning.
///
/// Idle connections are kept per host so the enrichment workers reuse
/// sockets against the single upstream instead of re-handshaking per page.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}
