//! Shared constants for sale-tracker.

/// Browser-like user agent sent with the scrape request to get past basic bot filtering.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5)";

/// Name of the single counter kept in the round-robin database.
pub const COUNTER_NAME: &str = "sale-count";

/// Chart raster width in pixels.
pub const CHART_WIDTH: u32 = 800;

/// Chart raster height in pixels.
pub const CHART_HEIGHT: u32 = 600;

/// Default timeout for every outbound HTTP call, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Native resolution of a freshly created round-robin database, in seconds.
pub const DEFAULT_STEP_SECS: i64 = 300;

/// How long a sample may be carried forward into an empty bucket, in seconds.
pub const DEFAULT_HEARTBEAT_SECS: i64 = 3600;

/// How long samples are kept before being aged out (a little over the year window).
pub const DEFAULT_RETENTION_SECS: i64 = 400 * 24 * 3600;

/// Default chart subject used in titles.
pub const DEFAULT_CHART_SUBJECT: &str = "Items for sale";

/// Default location string appended to chart titles.
pub const DEFAULT_CHART_LOCATION: &str = "1 mile from Broadstone";

/// Default watermark drawn on every chart.
pub const DEFAULT_WATERMARK: &str = "cloudguyinbroadstone.com";
