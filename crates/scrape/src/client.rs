use std::time::Duration;

use reqwest::header::USER_AGENT;
use sale_tracker_core::constants::USER_AGENT as BROWSER_USER_AGENT;

use crate::error::ScrapeError;
use crate::extract::extract_count;

/// HTTP client for the tracked page.
#[derive(Debug, Clone)]
pub struct CountScraper {
    client: reqwest::Client,
}

impl CountScraper {
    /// Creates a scraper whose requests time out after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `url` and extract the heading count.
    ///
    /// `Ok(None)` means the page loaded but its first heading carried no count,
    /// which callers must keep apart from a transport failure.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn fetch_count(&self, url: &str) -> Result<Option<u64>, ScrapeError> {
        let response = self.client.get(url).header(USER_AGENT, BROWSER_USER_AGENT).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus { code: status.as_u16(), url: url.to_owned() });
        }

        let body = response.text().await?;
        let count = extract_count(&body);
        match count {
            Some(n) => tracing::info!(url, count = n, "Scraped heading count"),
            None => tracing::warn!(url, bytes = body.len(), "No count found in page heading"),
        }
        Ok(count)
    }
}
