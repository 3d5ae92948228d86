//! Process configuration, assembled once at startup and passed by reference.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHART_LOCATION, DEFAULT_CHART_SUBJECT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_WATERMARK,
};
use crate::env_config::{env_parse_with_default, parse_toggle};
use crate::{CHART_SUFFIX, ConfigError, Period, Result};

pub const ENV_DB_FILE: &str = "TRACKER_DB_FILE";
pub const ENV_LOG_FILE: &str = "TRACKER_LOG_FILE";
pub const ENV_SCRAPE_URL: &str = "TRACKER_SCRAPE_URL";
pub const ENV_BUCKET: &str = "TRACKER_BUCKET";
pub const ENV_DISTRIBUTION_ID: &str = "TRACKER_DISTRIBUTION_ID";
pub const ENV_REFRESH_DISTRIBUTION: &str = "TRACKER_REFRESH_DISTRIBUTION";
pub const ENV_VERSION: &str = "TRACKER_VERSION";
pub const ENV_SCRATCH_DIR: &str = "TRACKER_SCRATCH_DIR";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "TRACKER_HTTP_TIMEOUT_SECS";
pub const ENV_BOOTSTRAP_MISSING: &str = "TRACKER_BOOTSTRAP_MISSING";
pub const ENV_CHART_SUBJECT: &str = "TRACKER_CHART_SUBJECT";
pub const ENV_CHART_LOCATION: &str = "TRACKER_CHART_LOCATION";
pub const ENV_WATERMARK: &str = "TRACKER_WATERMARK";

/// Text drawn on every chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSettings {
    pub subject: String,
    pub location: String,
    pub watermark: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            subject: DEFAULT_CHART_SUBJECT.to_owned(),
            location: DEFAULT_CHART_LOCATION.to_owned(),
            watermark: DEFAULT_WATERMARK.to_owned(),
        }
    }
}

impl ChartSettings {
    /// Title for one window, e.g. `Items for sale in the last day, 1 mile from Broadstone`.
    #[must_use]
    pub fn title(&self, period: Period) -> String {
        format!("{} in the last {period}, {}", self.subject, self.location)
    }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Round-robin database file name (also its key under `data/`).
    pub db_file: String,
    /// Plaintext log file name (also its key under `data/`).
    pub log_file: String,
    pub scrape_url: String,
    pub bucket: String,
    /// Required when `refresh_distribution` is set.
    pub distribution_id: Option<String>,
    pub refresh_distribution: bool,
    pub version: String,
    /// Local working directory for downloaded state and rendered charts.
    pub scratch_dir: PathBuf,
    pub http_timeout_secs: u64,
    /// Start from an empty store and log when the remote copies do not exist yet.
    pub bootstrap_missing: bool,
    pub chart: ChartSettings,
}

impl TrackerConfig {
    /// Read every setting from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let required = |var: &'static str| non_empty(var).ok_or(ConfigError::Missing(var));

        let db_file = required(ENV_DB_FILE)?;
        validate_data_file_name(ENV_DB_FILE, &db_file)?;
        let log_file = required(ENV_LOG_FILE)?;
        validate_data_file_name(ENV_LOG_FILE, &log_file)?;
        if db_file == log_file {
            return Err(ConfigError::InvalidValue {
                var: ENV_LOG_FILE,
                value: log_file,
                expected: "a file name different from the database file",
            });
        }

        let scrape_url = required(ENV_SCRAPE_URL)?;
        if !(scrape_url.starts_with("http://") || scrape_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                var: ENV_SCRAPE_URL,
                value: scrape_url,
                expected: "an http:// or https:// URL",
            });
        }

        let bucket = required(ENV_BUCKET)?;

        let refresh_distribution = match lookup(ENV_REFRESH_DISTRIBUTION) {
            Some(raw) => parse_toggle(ENV_REFRESH_DISTRIBUTION, &raw)?,
            None => false,
        };
        let distribution_id = non_empty(ENV_DISTRIBUTION_ID);
        if refresh_distribution && distribution_id.is_none() {
            return Err(ConfigError::Missing(ENV_DISTRIBUTION_ID));
        }

        let bootstrap_missing = match lookup(ENV_BOOTSTRAP_MISSING) {
            Some(raw) => parse_toggle(ENV_BOOTSTRAP_MISSING, &raw)?,
            None => false,
        };

        let http_timeout_secs = env_parse_with_default(
            ENV_HTTP_TIMEOUT_SECS,
            lookup(ENV_HTTP_TIMEOUT_SECS).as_deref(),
            DEFAULT_HTTP_TIMEOUT_SECS,
        );

        let defaults = ChartSettings::default();
        let chart = ChartSettings {
            subject: non_empty(ENV_CHART_SUBJECT).unwrap_or(defaults.subject),
            location: non_empty(ENV_CHART_LOCATION).unwrap_or(defaults.location),
            watermark: non_empty(ENV_WATERMARK).unwrap_or(defaults.watermark),
        };

        Ok(Self {
            db_file,
            log_file,
            scrape_url,
            bucket,
            distribution_id,
            refresh_distribution,
            version: non_empty(ENV_VERSION).unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned()),
            scratch_dir: non_empty(ENV_SCRATCH_DIR)
                .map_or_else(|| std::env::temp_dir().join("sale-tracker"), PathBuf::from),
            http_timeout_secs: http_timeout_secs.max(1),
            bootstrap_missing,
            chart,
        })
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.scratch_dir.join(&self.db_file)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.scratch_dir.join(&self.log_file)
    }

    #[must_use]
    pub fn chart_path(&self, period: Period) -> PathBuf {
        self.scratch_dir.join(period.chart_file_name())
    }

    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// The seven artifact names published after a successful update, data files first.
    #[must_use]
    pub fn artifact_names(&self) -> Vec<String> {
        let mut names = vec![self.db_file.clone(), self.log_file.clone()];
        names.extend(Period::ALL.iter().map(Period::chart_file_name));
        names
    }
}

/// Data file names double as object keys and scratch paths, so they must be
/// plain names that the upload router sends to the data prefix.
fn validate_data_file_name(var: &'static str, name: &str) -> Result<()> {
    let plain = !name.contains(['/', '\\']) && name != "." && name != "..";
    if !plain || name.ends_with(CHART_SUFFIX) {
        return Err(ConfigError::InvalidValue {
            var,
            value: name.to_owned(),
            expected: "a plain file name not ending in _graph.png",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_DB_FILE, "sales.rrd"),
            (ENV_LOG_FILE, "sales.csv"),
            (ENV_SCRAPE_URL, "https://example.com/search?q=bikes"),
            (ENV_BUCKET, "tracker-bucket"),
        ])
    }

    fn build(vars: &HashMap<&'static str, &'static str>) -> Result<TrackerConfig> {
        TrackerConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_owned()))
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = build(&base()).unwrap();
        assert_eq!(cfg.db_file, "sales.rrd");
        assert!(!cfg.refresh_distribution);
        assert!(!cfg.bootstrap_missing);
        assert_eq!(cfg.distribution_id, None);
        assert_eq!(cfg.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(cfg.chart, ChartSettings::default());
        assert_eq!(cfg.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_missing_required_setting() {
        let mut vars = base();
        vars.remove(ENV_BUCKET);
        assert_eq!(build(&vars).unwrap_err(), ConfigError::Missing(ENV_BUCKET));
    }

    #[test]
    fn test_refresh_requires_distribution() {
        let mut vars = base();
        vars.insert(ENV_REFRESH_DISTRIBUTION, "TRUE");
        assert_eq!(build(&vars).unwrap_err(), ConfigError::Missing(ENV_DISTRIBUTION_ID));

        vars.insert(ENV_DISTRIBUTION_ID, "E2EXAMPLE");
        let cfg = build(&vars).unwrap();
        assert!(cfg.refresh_distribution);
        assert_eq!(cfg.distribution_id.as_deref(), Some("E2EXAMPLE"));
    }

    #[test]
    fn test_unrecognized_toggle_is_rejected() {
        let mut vars = base();
        vars.insert(ENV_REFRESH_DISTRIBUTION, "maybe");
        assert!(matches!(
            build(&vars).unwrap_err(),
            ConfigError::InvalidValue { var: ENV_REFRESH_DISTRIBUTION, .. }
        ));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let mut vars = base();
        vars.insert(ENV_HTTP_TIMEOUT_SECS, "soon");
        assert_eq!(build(&vars).unwrap().http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        vars.insert(ENV_HTTP_TIMEOUT_SECS, "5");
        assert_eq!(build(&vars).unwrap().http_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_data_file_names_are_validated() {
        for bad in ["../sales.rrd", "dir/sales.rrd", "sales_graph.png"] {
            let mut vars = base();
            vars.insert(ENV_DB_FILE, bad);
            assert!(build(&vars).is_err(), "{bad}");
        }
        let mut vars = base();
        vars.insert(ENV_LOG_FILE, "sales.rrd");
        assert!(build(&vars).is_err());
    }

    #[test]
    fn test_scrape_url_must_be_http() {
        let mut vars = base();
        vars.insert(ENV_SCRAPE_URL, "ftp://example.com");
        assert!(build(&vars).is_err());
    }

    #[test]
    fn test_artifact_names_and_paths() {
        let mut vars = base();
        vars.insert(ENV_SCRATCH_DIR, "/tmp/tracker-test");
        let cfg = build(&vars).unwrap();
        let names = cfg.artifact_names();
        assert_eq!(names.len(), 7);
        assert_eq!(&names[..2], ["sales.rrd", "sales.csv"]);
        assert_eq!(cfg.db_path(), PathBuf::from("/tmp/tracker-test/sales.rrd"));
        assert_eq!(cfg.chart_path(Period::Week), PathBuf::from("/tmp/tracker-test/week_graph.png"));
    }

    #[test]
    fn test_chart_title() {
        let chart = ChartSettings::default();
        assert_eq!(
            chart.title(Period::Day),
            "Items for sale in the last day, 1 mile from Broadstone"
        );
    }
}
