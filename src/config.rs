use crate::model::{Requirements, Site};
use crate::utils::jitter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub site: Site,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Listings per search page whose detail page is fetched. Defaults to 3
    /// for Amazon and 0 for Flipkart.
    #[serde(default)]
    pub detail_pages_per_page: Option<usize>,
    /// Random pause after each detail fetch, `[min, max]` in milliseconds.
    #[serde(default = "default_detail_delay")]
    pub detail_delay_ms: [u64; 2],
    /// Random pause between search pages, `[min, max]` in milliseconds.
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: [u64; 2],
}

impl SourceConfig {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            max_results: default_max_results(),
            max_pages: default_max_pages(),
            detail_pages_per_page: None,
            detail_delay_ms: default_detail_delay(),
            page_delay_ms: default_page_delay(),
        }
    }

    pub fn detail_pages(&self) -> usize {
        self.detail_pages_per_page.unwrap_or(match self.site {
            Site::Amazon => 3,
            Site::Flipkart => 0,
        })
    }

    pub fn detail_delay(&self) -> Duration {
        jitter(self.detail_delay_ms[0], self.detail_delay_ms[1])
    }

    pub fn page_delay(&self) -> Duration {
        jitter(self.page_delay_ms[0], self.page_delay_ms[1])
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_backoff_min")]
    pub backoff_min_ms: u64,
    #[serde(default = "default_backoff_max")]
    pub backoff_max_ms: u64,
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        jitter(self.backoff_min_ms, self.backoff_max_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            backoff_min_ms: default_backoff_min(),
            backoff_max_ms: default_backoff_max(),
        }
    }
}

/// Confidence-based guesses applied during extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct Heuristics {
    /// Treat a 4K match as FHD when the same text advertises 144Hz.
    #[serde(default = "default_true")]
    pub downgrade_4k_at_144hz: bool,
    /// Value used for a bare "windows" found in a product name.
    #[serde(default = "default_bare_windows")]
    pub bare_windows_as: Option<String>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            downgrade_4k_at_144hz: true,
            bare_windows_as: default_bare_windows(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub query: String,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub heuristics: Heuristics,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    if config.query.trim().is_empty() {
        return Err(ConfigError::Invalid("query must not be empty".into()));
    }
    if config.top_n == 0 {
        return Err(ConfigError::Invalid("top_n must be at least 1".into()));
    }
    if config.sources.is_empty() {
        return Err(ConfigError::Invalid("at least one source is required".into()));
    }
    Ok(config)
}

fn default_max_results() -> usize {
    10
}

fn default_max_pages() -> u32 {
    5
}

fn default_detail_delay() -> [u64; 2] {
    [1000, 3000]
}

fn default_page_delay() -> [u64; 2] {
    [2000, 4000]
}

fn default_attempts() -> u32 {
    2
}

fn default_backoff_min() -> u64 {
    2000
}

fn default_backoff_max() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_bare_windows() -> Option<String> {
    Some("windows 11".to_string())
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::new(Site::Flipkart), SourceConfig::new(Site::Amazon)]
}

fn default_top_n() -> usize {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}
