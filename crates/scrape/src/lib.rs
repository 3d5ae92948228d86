//! Count scraper: fetch a page and pull the integer out of its first `<h1>`.

mod client;
mod error;
mod extract;

pub use client::CountScraper;
pub use error::ScrapeError;
pub use extract::extract_count;
