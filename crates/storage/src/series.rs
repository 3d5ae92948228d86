//! Series store abstraction and the consolidated series it returns.

use sale_tracker_core::TimeWindow;
use serde::Serialize;

use crate::StorageError;

/// Upper bound on the number of consolidated points a query returns
/// (one per pixel column of a chart).
pub const MAX_QUERY_POINTS: i64 = 800;

/// A time-series store holding one counter.
pub trait SeriesStore {
    /// Record `value` at `timestamp`, then run `and_then` before the write becomes
    /// durable. If `and_then` fails the write is discarded and its error returned.
    fn update_with(
        &mut self,
        timestamp: i64,
        value: u64,
        and_then: &mut dyn FnMut() -> Result<(), StorageError>,
    ) -> Result<(), StorageError>;

    /// AVERAGE-consolidated series over `window`.
    fn query(&self, window: TimeWindow) -> Result<Series, StorageError>;

    /// Record `value` at `timestamp`.
    fn update(&mut self, timestamp: i64, value: u64) -> Result<(), StorageError> {
        self.update_with(timestamp, value, &mut || Ok(()))
    }
}

/// One consolidated bucket. `value` is `None` when the bucket is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Start of the bucket, unix seconds.
    pub timestamp: i64,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub window: TimeWindow,
    /// Bucket width in seconds.
    pub resolution: i64,
    pub points: Vec<SeriesPoint>,
}

/// Minimum, maximum and average over the known buckets of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}

impl Series {
    /// Known `(timestamp, value)` pairs, gaps skipped.
    pub fn known(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.points.iter().filter_map(|p| p.value.map(|v| (p.timestamp, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.known().next().is_none()
    }

    /// Value of the newest known bucket.
    pub fn latest(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }

    pub fn summary(&self) -> SeriesSummary {
        let mut count = 0_u32;
        let mut sum = 0.0_f64;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        for (_, v) in self.known() {
            count += 1;
            sum += v;
            min = Some(min.map_or(v, |m| m.min(v)));
            max = Some(max.map_or(v, |m| m.max(v)));
        }
        let average = (count > 0).then(|| sum / f64::from(count));
        SeriesSummary { min, max, average }
    }
}

/// Bucket width for a window: the native step, widened so the window fits in
/// at most [`MAX_QUERY_POINTS`] buckets.
pub(crate) fn resolution_for(window: TimeWindow, step: i64) -> i64 {
    let span = window.span_secs().max(1);
    let per_point = (span + MAX_QUERY_POINTS - 1) / MAX_QUERY_POINTS;
    step.max(per_point)
}

/// Consolidate raw samples (sorted by timestamp) into fixed buckets over `window`.
///
/// A bucket holding samples takes their mean. An empty bucket carries the most
/// recent earlier sample forward when it is at most `heartbeat` seconds old at
/// the bucket start, and is unknown otherwise.
pub(crate) fn consolidate(
    window: TimeWindow,
    resolution: i64,
    heartbeat: i64,
    samples: &[(i64, u64)],
) -> Vec<SeriesPoint> {
    let mut points = Vec::new();
    let mut idx = 0;
    let mut last_seen: Option<(i64, u64)> = None;

    // Samples before the window only feed the carry-forward.
    while let Some(&s) = samples.get(idx) {
        if s.0 >= window.start {
            break;
        }
        last_seen = Some(s);
        idx += 1;
    }

    let mut bucket_start = window.start;
    while bucket_start <= window.end {
        let bucket_end = (bucket_start + resolution - 1).min(window.end);
        let mut sum = 0_u128;
        let mut n = 0_u32;
        while let Some(&s) = samples.get(idx) {
            if s.0 > bucket_end {
                break;
            }
            sum += u128::from(s.1);
            n += 1;
            last_seen = Some(s);
            idx += 1;
        }

        let value = if n > 0 {
            Some(sum as f64 / f64::from(n))
        } else {
            last_seen.filter(|(ts, _)| bucket_start - ts <= heartbeat).map(|(_, v)| v as f64)
        };
        points.push(SeriesPoint { timestamp: bucket_start, value });
        bucket_start += resolution;
    }

    points
}
