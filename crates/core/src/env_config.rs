//! Setting parsing with warn-level logging for invalid values.
//!
//! Every function takes the raw value as already looked up, so callers decide
//! where settings come from (process environment, CLI overrides, test maps).

use crate::ConfigError;

/// Parse a setting with a default fallback.
///
/// - If the value is absent: returns `default` silently (expected case).
/// - If the value is present but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid setting value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Parse a strict boolean toggle.
///
/// Accepts `true` / `false` in any case, surrounding whitespace ignored. Anything
/// else is rejected instead of silently falling through to either branch.
pub fn parse_toggle(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidValue {
            var,
            value: raw.to_owned(),
            expected: "\"true\" or \"false\"",
        })
    }
}
