use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while assembling the process configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue { var: &'static str, value: String, expected: &'static str },
}

/// Errors from parsing a plaintext log record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed log record {0:?}: expected <timestamp>|<count>")]
    Malformed(String),
}

pub type Result<T> = StdResult<T, ConfigError>;
