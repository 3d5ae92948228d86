//! Storage layer for sale-tracker
//!
//! A SQLite-backed round-robin series store for the single counter, plus the
//! plaintext log that mirrors every sample as a human-auditable copy.

mod error;
mod migrations;
mod sample_log;
mod series;
mod sqlite_series;
#[cfg(test)]
mod tests;
mod updater;

pub use error::StorageError;
pub use sample_log::SampleLog;
pub use series::{MAX_QUERY_POINTS, Series, SeriesPoint, SeriesStore, SeriesSummary};
pub use sqlite_series::{SqliteSeriesStore, StoreLayout};
pub use updater::SeriesUpdater;
