//! Typed error enum for the scrape crate.

use thiserror::Error;

/// Transport-level scrape failures. A page that loads but carries no count is
/// not an error; see [`crate::CountScraper::fetch_count`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code} from {url}")]
    HttpStatus { code: u16, url: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
