#[cfg(test)]
mod storage_tests {
    use crate::{SampleLog, SeriesStore, SeriesUpdater, SqliteSeriesStore, StorageError, StoreLayout};
    use sale_tracker_core::{Observation, Period};
    use tempfile::TempDir;

    const T0: i64 = 1_700_000_000;

    fn create_test_store() -> (SqliteSeriesStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSeriesStore::open(&temp_dir.path().join("sales.rrd")).unwrap();
        (store, temp_dir)
    }

    fn create_test_updater() -> (SeriesUpdater<SqliteSeriesStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSeriesStore::open(&temp_dir.path().join("sales.rrd")).unwrap();
        let log = SampleLog::new(temp_dir.path().join("sales.csv"));
        (SeriesUpdater::new(store, log), temp_dir)
    }

    #[test]
    fn test_new_store_is_empty() {
        let (store, _temp_dir) = create_test_store();
        assert_eq!(store.sample_count().unwrap(), 0);
        assert_eq!(store.last_update(), None);
        assert_eq!(store.layout(), StoreLayout::default());
    }

    #[test]
    fn test_update_then_query_hour_window() {
        let (mut store, _temp_dir) = create_test_store();
        store.update(T0, 57).unwrap();

        let series = store.query(Period::Hour.window_ending_at(T0 + 1)).unwrap();
        assert_eq!(series.resolution, 300);
        assert_eq!(series.latest(), Some(57.0));
        let summary = series.summary();
        assert_eq!(summary.min, Some(57.0));
        assert_eq!(summary.max, Some(57.0));
    }

    #[test]
    fn test_query_reflects_each_written_value() {
        let (mut store, _temp_dir) = create_test_store();
        for (offset, value) in [(0, 10), (900, 20), (1800, 30), (2700, 40)] {
            store.update(T0 + offset, value).unwrap();
        }
        let series = store.query(Period::Hour.window_ending_at(T0 + 3600)).unwrap();
        let known: Vec<f64> = series.known().map(|(_, v)| v).collect();
        for expected in [10.0, 20.0, 30.0, 40.0] {
            assert!(known.contains(&expected), "{expected} missing from {known:?}");
        }
        assert_eq!(series.summary().min, Some(10.0));
        assert_eq!(series.summary().max, Some(40.0));
    }

    #[test]
    fn test_same_second_update_is_rejected() {
        let (mut store, _temp_dir) = create_test_store();
        store.update(T0, 1).unwrap();
        let err = store.update(T0, 2).unwrap_err();
        assert!(err.is_stale_update());
        assert!(matches!(store.update(T0 - 10, 2), Err(StorageError::StaleUpdate { .. })));
        assert_eq!(store.sample_count().unwrap(), 1);
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.rrd");
        {
            let mut store = SqliteSeriesStore::open(&path).unwrap();
            store.update(T0, 5).unwrap();
        }
        let store = SqliteSeriesStore::open(&path).unwrap();
        assert_eq!(store.last_update(), Some(T0));
        assert_eq!(store.sample_count().unwrap(), 1);
    }

    #[test]
    fn test_existing_layout_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.rrd");
        let custom = StoreLayout { step: 60, heartbeat: 120, retention: 86_400 };
        drop(SqliteSeriesStore::open_or_create(&path, custom).unwrap());
        let store = SqliteSeriesStore::open(&path).unwrap();
        assert_eq!(store.layout(), custom);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let bad = StoreLayout { step: 0, heartbeat: 1, retention: 1 };
        let result = SqliteSeriesStore::open_or_create(&temp_dir.path().join("x.rrd"), bad);
        assert!(matches!(result, Err(StorageError::InvalidLayout(_))));
    }

    #[test]
    fn test_retention_ages_out_old_samples() {
        let temp_dir = TempDir::new().unwrap();
        let layout = StoreLayout { step: 60, heartbeat: 120, retention: 1000 };
        let mut store =
            SqliteSeriesStore::open_or_create(&temp_dir.path().join("x.rrd"), layout).unwrap();
        store.update(T0, 1).unwrap();
        store.update(T0 + 500, 2).unwrap();
        store.update(T0 + 1200, 3).unwrap();
        assert_eq!(store.sample_count().unwrap(), 2);
    }

    #[test]
    fn test_non_database_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.rrd");
        std::fs::write(&path, vec![0x42_u8; 4096]).unwrap();
        assert!(matches!(SqliteSeriesStore::open(&path), Err(StorageError::Database(_))));
    }

    #[test]
    fn test_log_append_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let log = SampleLog::new(temp_dir.path().join("sales.csv"));
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.last().unwrap(), None);

        log.append(&Observation::new(T0, 1)).unwrap();
        log.append(&Observation::new(T0 + 60, 2)).unwrap();
        log.append(&Observation::new(T0 + 120, 3)).unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, format!("{T0}|1\n{}|2\n{}|3\n", T0 + 60, T0 + 120));
        assert_eq!(log.tail(2).unwrap(), vec![Observation::new(T0 + 60, 2), Observation::new(T0 + 120, 3)]);
        assert_eq!(log.last().unwrap(), Some(Observation::new(T0 + 120, 3)));
    }

    #[test]
    fn test_log_appends_to_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        std::fs::write(&path, "100|7\n").unwrap();
        let log = SampleLog::new(&path);
        log.append(&Observation::new(200, 8)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "100|7\n200|8\n");
    }

    #[test]
    fn test_log_reports_malformed_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        std::fs::write(&path, "100|7\nnot a record\n").unwrap();
        let err = SampleLog::new(&path).read_all().unwrap_err();
        assert!(matches!(err, StorageError::Record { line: 2, .. }));
    }

    #[test]
    fn test_updater_writes_both_representations() {
        let (mut updater, _temp_dir) = create_test_updater();
        updater.record(Observation::new(T0, 57)).unwrap();

        assert_eq!(updater.log().last().unwrap(), Some(Observation::new(T0, 57)));
        assert_eq!(updater.store().last_update(), Some(T0));
        assert_eq!(updater.store().sample_count().unwrap(), 1);
    }

    #[test]
    fn test_updater_rolls_back_store_when_log_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteSeriesStore::open(&temp_dir.path().join("sales.rrd")).unwrap();
        // A directory cannot be opened for appending.
        let log_path = temp_dir.path().join("sales.csv");
        std::fs::create_dir(&log_path).unwrap();
        let mut updater = SeriesUpdater::new(store, SampleLog::new(&log_path));

        let err = updater.record(Observation::new(T0, 57)).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));

        let store = updater.into_store();
        assert_eq!(store.sample_count().unwrap(), 0);
        assert_eq!(store.last_update(), None);
    }

    #[test]
    fn test_updater_leaves_log_alone_on_stale_update() {
        let (mut updater, _temp_dir) = create_test_updater();
        updater.record(Observation::new(T0, 1)).unwrap();
        assert!(updater.record(Observation::new(T0, 2)).unwrap_err().is_stale_update());
        assert_eq!(updater.log().read_all().unwrap(), vec![Observation::new(T0, 1)]);
    }
}
