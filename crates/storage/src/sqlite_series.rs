//! SQLite implementation of the round-robin series store

use std::path::Path;

use rusqlite::{Connection, params};
use sale_tracker_core::TimeWindow;
use sale_tracker_core::constants::{
    COUNTER_NAME, DEFAULT_HEARTBEAT_SECS, DEFAULT_RETENTION_SECS, DEFAULT_STEP_SECS,
};
use serde::Serialize;

use crate::series::{consolidate, resolution_for};
use crate::{Series, SeriesStore, StorageError, migrations};

/// Fixed parameters of a store, chosen when the file is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreLayout {
    /// Native resolution in seconds.
    pub step: i64,
    /// Max age in seconds for a sample to fill a later empty bucket.
    pub heartbeat: i64,
    /// Samples older than this (relative to the newest update) are aged out.
    pub retention: i64,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP_SECS,
            heartbeat: DEFAULT_HEARTBEAT_SECS,
            retention: DEFAULT_RETENTION_SECS,
        }
    }
}

impl StoreLayout {
    fn validate(&self) -> Result<(), StorageError> {
        if self.step <= 0 || self.heartbeat <= 0 || self.retention <= 0 {
            return Err(StorageError::InvalidLayout(format!(
                "step, heartbeat and retention must be positive (got {}, {}, {})",
                self.step, self.heartbeat, self.retention
            )));
        }
        Ok(())
    }
}

pub struct SqliteSeriesStore {
    conn: Connection,
    layout: StoreLayout,
    last_update: Option<i64>,
}

impl SqliteSeriesStore {
    /// Open an existing store, or create one with the default layout.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_or_create(path, StoreLayout::default())
    }

    /// Open an existing store, or create one with `layout`. The layout of an
    /// existing file always wins over `layout`.
    pub fn open_or_create(path: &Path, layout: StoreLayout) -> Result<Self, StorageError> {
        layout.validate()?;
        let existed = path.exists();
        let conn = Connection::open(path)?;
        migrations::run_migrations(&conn)?;

        conn.execute(
            "INSERT OR IGNORE INTO archive (id, counter, step, heartbeat, retention, last_update)
             VALUES (1, ?1, ?2, ?3, ?4, NULL)",
            params![COUNTER_NAME, layout.step, layout.heartbeat, layout.retention],
        )?;

        let (counter, stored, last_update) = conn.query_row(
            "SELECT counter, step, heartbeat, retention, last_update FROM archive WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    StoreLayout { step: row.get(1)?, heartbeat: row.get(2)?, retention: row.get(3)? },
                    row.get::<_, Option<i64>>(4)?,
                ))
            },
        )?;
        if counter != COUNTER_NAME {
            return Err(StorageError::InvalidLayout(format!(
                "store tracks counter {counter:?}, expected {COUNTER_NAME:?}"
            )));
        }
        stored.validate()?;

        if existed {
            tracing::debug!(path = %path.display(), ?last_update, "Opened series store");
        } else {
            tracing::info!(path = %path.display(), step = stored.step, "Created new series store");
        }

        Ok(Self { conn, layout: stored, last_update })
    }

    #[must_use]
    pub const fn layout(&self) -> StoreLayout {
        self.layout
    }

    /// Timestamp of the newest accepted update.
    #[must_use]
    pub const fn last_update(&self) -> Option<i64> {
        self.last_update
    }

    pub fn sample_count(&self) -> Result<u64, StorageError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl SeriesStore for SqliteSeriesStore {
    fn update_with(
        &mut self,
        timestamp: i64,
        value: u64,
        and_then: &mut dyn FnMut() -> Result<(), StorageError>,
    ) -> Result<(), StorageError> {
        if let Some(last_update) = self.last_update {
            if timestamp <= last_update {
                return Err(StorageError::StaleUpdate { timestamp, last_update });
            }
        }
        let stored_value = i64::try_from(value).map_err(|_| StorageError::ValueOutOfRange(value))?;

        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO samples (ts, value) VALUES (?1, ?2)", params![timestamp, stored_value])?;
        tx.execute("UPDATE archive SET last_update = ?1 WHERE id = 1", params![timestamp])?;
        let aged_out = tx.execute(
            "DELETE FROM samples WHERE ts < ?1",
            params![timestamp.saturating_sub(self.layout.retention)],
        )?;

        // Dropping the transaction on error rolls the sample back.
        and_then()?;
        tx.commit()?;

        self.last_update = Some(timestamp);
        if aged_out > 0 {
            tracing::debug!(aged_out, "Aged out samples past retention");
        }
        Ok(())
    }

    fn query(&self, window: TimeWindow) -> Result<Series, StorageError> {
        let resolution = resolution_for(window, self.layout.step);
        let mut stmt = self
            .conn
            .prepare("SELECT ts, value FROM samples WHERE ts >= ?1 AND ts <= ?2 ORDER BY ts")?;
        let samples = stmt
            .query_map(params![window.start.saturating_sub(self.layout.heartbeat), window.end], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
            })?
            .map(|row| row.map(|(ts, v)| (ts, u64::try_from(v).unwrap_or_default())))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            start = window.start,
            end = window.end,
            resolution,
            samples = samples.len(),
            "Consolidating series"
        );

        Ok(Series {
            window,
            resolution,
            points: consolidate(window, resolution, self.layout.heartbeat, &samples),
        })
    }
}
