// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory API endpoints and paging
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.workers == 0 {
            return Err(AppError::validation("crawler.workers must be > 0"));
        }
        if self.crawler.checkpoint_interval == 0 {
            return Err(AppError::validation(
                "crawler.checkpoint_interval must be > 0",
            ));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        Url::parse(&self.api.site_url)
            .map_err(|e| AppError::validation(format!("api.site_url is invalid: {e}")))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            crawler: CrawlerConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// Directory API endpoints and paging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Discovery search endpoint returning organization pages
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Canonical site root; detail pages live under /organization/{key}
    #[serde(default = "defaults::site_url")]
    pub site_url: String,

    /// Organizations requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            site_url: defaults::site_url(),
            page_size: defaults::page_size(),
        }
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of concurrent enrichment workers
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// Delay between requests per worker in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Retries after a failed request (attempts = max_retries + 1)
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds, scaled linearly
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,

    /// Checkpoint the progress file every N completed organizations
    #[serde(default = "defaults::checkpoint_interval")]
    pub checkpoint_interval: usize,
}

impl CrawlerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            workers: defaults::workers(),
            request_delay_ms: defaults::request_delay(),
            max_retries: defaults::max_retries(),
            retry_delay_ms: defaults::retry_delay(),
            checkpoint_interval: defaults::checkpoint_interval(),
        }
    }
}

/// Output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory receiving per-organization JSON files
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Checkpoint file tracking completed organizations
    #[serde(default = "defaults::progress_file")]
    pub progress_file: PathBuf,

    /// Consolidated dataset file name, written inside output_dir
    #[serde(default = "defaults::aggregate_file")]
    pub aggregate_file: String,
}

impl PathsConfig {
    /// Full path of the consolidated dataset file.
    pub fn aggregate_path(&self) -> PathBuf {
        self.output_dir.join(&self.aggregate_file)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: defaults::output_dir(),
            progress_file: defaults::progress_file(),
            aggregate_file: defaults::aggregate_file(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // API defaults
    pub fn base_url() -> String {
        "https://callink.berkeley.edu/api/discovery/search/organizations".into()
    }
    pub fn site_url() -> String {
        "https://callink.berkeley.edu".into()
    }
    pub fn page_size() -> usize {
        100
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64; rv:143.0) Gecko/20100101 Firefox/143.0".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn workers() -> usize {
        10
    }
    pub fn request_delay() -> u64 {
        200
    }
    pub fn max_retries() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        2000
    }
    pub fn checkpoint_interval() -> usize {
        10
    }

    // Path defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from("data")
    }
    pub fn progress_file() -> PathBuf {
        PathBuf::from("progress.json")
    }
    pub fn aggregate_file() -> String {
        "all_organizations_detailed.json".into()
    }
}
