use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.usms.org/comp/meets/";
pub const DEFAULT_RESULTS_BLOCK_STYLE: &str =
    "white-space: pre; font-size:13px; font-family: monospace";

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u8,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_results_block_style")]
    pub results_block_style: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            user_agent: None,
            results_block_style: default_results_block_style(),
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("base_url is not a valid url: {}", self.base_url))?;
        if !base.path().ends_with('/') {
            bail!("base_url must end with '/' so relative links resolve under it");
        }
        if self.page_size == 0 {
            bail!("page_size must be greater than zero");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.results_block_style.trim().is_empty() {
            bail!("results_block_style must not be empty");
        }
        Ok(())
    }

    pub fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("invalid base_url {}", self.base_url))
    }

    /// Meet-list page URL; `page` counts pages, the site pages by row offset.
    pub fn meet_list_url(&self, page: usize) -> Result<String> {
        let mut url = self
            .base()?
            .join("meetlist.php")
            .context("failed to build meet list url")?;
        url.query_pairs_mut()
            .append_pair("page", &(page * self.page_size).to_string())
            .append_pair("CourseID", "0")
            .append_pair("LMSCID", "");
        Ok(url.to_string())
    }
}

pub fn load_crawl_config(path: &Path) -> Result<CrawlConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read crawl config: {}", path.display()))?;
    let config: CrawlConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid crawl config {}", path.display()))?;
    Ok(config)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_retry_attempts() -> u8 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_results_block_style() -> String {
    DEFAULT_RESULTS_BLOCK_STYLE.to_string()
}
