//! Service layer for sale-tracker
//!
//! Runs one invocation of the linear pipeline: fetch state, scrape, update,
//! render, publish, and optionally invalidate the CDN cache.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod error;
mod fetcher;
mod invalidation;
mod pipeline;
mod publisher;

pub use error::ServiceError;
pub use fetcher::{FetchStatus, StateFetcher};
pub use invalidation::{InvalidationOutcome, invalidate_charts};
pub use pipeline::TrackerPipeline;
pub use publisher::StatePublisher;
