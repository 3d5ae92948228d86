use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifact::CHART_SUFFIX;

/// A named look-back window bounding a chart's time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Every window, in rendering order.
    pub const ALL: [Self; 5] = [Self::Hour, Self::Day, Self::Week, Self::Month, Self::Year];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Window length in seconds. Months are 30 days and years 365 days.
    #[must_use]
    pub const fn duration_secs(&self) -> i64 {
        match *self {
            Self::Hour => 3600,
            Self::Day => 24 * 3600,
            Self::Week => 7 * 24 * 3600,
            Self::Month => 30 * 24 * 3600,
            Self::Year => 365 * 24 * 3600,
        }
    }

    /// File name of the chart rendered for this window, e.g. `day_graph.png`.
    #[must_use]
    pub fn chart_file_name(&self) -> String {
        format!("{}{CHART_SUFFIX}", self.as_str())
    }

    /// The closed window `[now - duration, now - 1]` charted for this period.
    #[must_use]
    pub const fn window_ending_at(&self, now: i64) -> TimeWindow {
        TimeWindow { start: now - self.duration_secs(), end: now - 1 }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown period: {s}"))
    }
}

/// Closed interval of unix timestamps, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    #[must_use]
    pub const fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// Number of seconds covered, counting both endpoints.
    #[must_use]
    pub const fn span_secs(&self) -> i64 {
        self.end - self.start + 1
    }
}
