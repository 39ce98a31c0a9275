// src/services/directory.rs

//! Paginated fetching of the organization list API.
//!
//! The `@odata.count` of a minimal probe page decides how many pages get
//! requested; page lengths are never trusted for that. A page that fails
//! after retries aborts the whole list phase, because a partial candidate
//! set cannot be told apart from a complete one.

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{DiscoveryResponse, Organization};
use crate::services::fetch::{ACCEPT_JSON, Fetcher};

/// Client for the discovery search endpoint.
pub struct DirectoryClient {
    fetcher: Fetcher,
    base_url: String,
    page_size: usize,
}

impl DirectoryClient {
    pub fn new(fetcher: Fetcher, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        }
    }

    /// Query string in the exact pre-encoded form the upstream expects.
    fn search_url(&self, top: usize, skip: usize) -> String {
        format!(
            "{}?orderBy%5B0%5D=UpperName%20asc&top={top}&filter=&query=&skip={skip}",
            self.base_url
        )
    }

    /// Read the authoritative organization count from a one-row probe.
    pub async fn fetch_total_count(&self) -> Result<usize> {
        let url = self.search_url(1, 0);
        let page = self.fetcher.get_with(&url, ACCEPT_JSON, decode_page).await?;
        Ok(page.count)
    }

    /// Fetch one page of organizations at the given offset.
    pub async fn fetch_page(&self, skip: usize) -> Result<Vec<Organization>> {
        let url = self.search_url(self.page_size, skip);
        let page = self.fetcher.get_with(&url, ACCEPT_JSON, decode_page).await?;
        Ok(page.value)
    }

    /// Fetch every page sequentially and concatenate in server order.
    pub async fn fetch_all(&self, total: usize) -> Result<Vec<Organization>> {
        let skips = page_skips(total, self.page_size);
        let total_pages = skips.len();
        let mut organizations = Vec::with_capacity(total);

        for (page, skip) in skips.into_iter().enumerate() {
            let mut orgs = self.fetch_page(skip).await?;
            organizations.append(&mut orgs);

            if page % 5 == 0 {
                log::info!(
                    "Fetched page {}/{} ({} organizations so far)",
                    page + 1,
                    total_pages,
                    organizations.len()
                );
            }
        }

        Ok(organizations)
    }
}

fn decode_page(body: &str) -> Result<DiscoveryResponse> {
    serde_json::from_str(body).map_err(AppError::from)
}

/// Number of pages needed to cover `total` records.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Offsets of every page covering `total` records.
pub fn page_skips(total: usize, page_size: usize) -> Vec<usize> {
    (0..page_count(total, page_size))
        .map(|page| page * page_size)
        .collect()
}
