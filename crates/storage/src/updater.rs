use sale_tracker_core::Observation;

use crate::{SampleLog, SeriesStore, StorageError};

/// Records one observation into both the series store and the plaintext log
/// as a single logical append: either both change or neither does.
pub struct SeriesUpdater<S> {
    store: S,
    log: SampleLog,
}

impl<S: SeriesStore> SeriesUpdater<S> {
    pub const fn new(store: S, log: SampleLog) -> Self {
        Self { store, log }
    }

    pub fn record(&mut self, observation: Observation) -> Result<(), StorageError> {
        let log = &self.log;
        self.store.update_with(observation.timestamp, observation.value, &mut || {
            log.append(&observation)
        })?;
        tracing::info!(
            timestamp = observation.timestamp,
            value = observation.value,
            log = %log.path().display(),
            "Recorded observation"
        );
        Ok(())
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn log(&self) -> &SampleLog {
        &self.log
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
