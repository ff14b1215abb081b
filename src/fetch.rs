use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::info;

/// Blocking HTTP client for the two documentation pages.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url` and return the body. Non-success statuses are errors; no retry.
    pub fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .with_context(|| format!("Failed to fetch {}", url))?;
        info!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
