use serde::{Deserialize, Serialize};

use crate::RecordError;

/// One recorded count at one instant. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Unix timestamp, seconds.
    pub timestamp: i64,
    pub value: u64,
}

impl Observation {
    #[must_use]
    pub const fn new(timestamp: i64, value: u64) -> Self {
        Self { timestamp, value }
    }

    /// The plaintext log line for this observation, newline included.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!("{}|{}\n", self.timestamp, self.value)
    }

    /// Parse one `timestamp|value` log record (trailing newline optional).
    pub fn parse_log_line(line: &str) -> Result<Self, RecordError> {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        let (ts, value) =
            trimmed.split_once('|').ok_or_else(|| RecordError::Malformed(trimmed.to_owned()))?;
        let timestamp = ts.parse().map_err(|_| RecordError::Malformed(trimmed.to_owned()))?;
        let value = value.parse().map_err(|_| RecordError::Malformed(trimmed.to_owned()))?;
        Ok(Self { timestamp, value })
    }
}

/// Current wall-clock time as integer unix seconds.
#[must_use]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
