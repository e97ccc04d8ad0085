use crate::config::CrawlConfig;
use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of page bodies for the crawler.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    retry_attempts: u8,
    retry_backoff_ms: u64,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(user_agent) = &config.user_agent {
            headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            client,
            retry_attempts: config.retry_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let attempts = self.retry_attempts.max(1);

        for attempt in 1..=attempts {
            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let body = resp
                            .text()
                            .with_context(|| format!("failed to read body from {url}"))?;
                        debug!(%url, bytes = body.len(), "fetched page");
                        return Ok(body);
                    }
                    if attempt == attempts {
                        bail!("request to {url} failed with status {status}");
                    }
                    warn!(%url, %status, attempt, "request failed; retrying");
                }
                Err(err) => {
                    if attempt == attempts {
                        return Err(err).with_context(|| format!("request to {url} failed"));
                    }
                    warn!(%url, attempt, error = %err, "request errored; retrying");
                }
            }

            std::thread::sleep(Duration::from_millis(self.retry_backoff_ms));
        }

        bail!("request to {url} failed after retries")
    }
}
