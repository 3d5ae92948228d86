use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use sale_tracker_cloud::{
    CacheInvalidator, CloudFrontInvalidator, DisabledInvalidator, LocalObjectStore, ObjectStore,
    S3ObjectStore, load_sdk_config,
};
use sale_tracker_core::{
    ENV_BOOTSTRAP_MISSING, ENV_BUCKET, ENV_DB_FILE, ENV_DISTRIBUTION_ID, ENV_LOG_FILE,
    ENV_REFRESH_DISTRIBUTION, ENV_SCRAPE_URL, ENV_SCRATCH_DIR, TrackerConfig,
};
use sale_tracker_service::TrackerPipeline;

/// Bucket name recorded for offline runs when none is configured.
const LOCAL_BUCKET: &str = "local";

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Use a directory as the object store instead of S3 (disables CDN refresh)
    #[arg(long)]
    local_store: Option<PathBuf>,
    #[arg(long, env = "TRACKER_DB_FILE")]
    db_file: Option<String>,
    #[arg(long, env = "TRACKER_LOG_FILE")]
    log_file: Option<String>,
    #[arg(long, env = "TRACKER_SCRAPE_URL")]
    scrape_url: Option<String>,
    #[arg(long, env = "TRACKER_BUCKET")]
    bucket: Option<String>,
    #[arg(long, env = "TRACKER_DISTRIBUTION_ID")]
    distribution_id: Option<String>,
    #[arg(long, env = "TRACKER_REFRESH_DISTRIBUTION")]
    refresh_distribution: Option<String>,
    #[arg(long, env = "TRACKER_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,
    #[arg(long, env = "TRACKER_BOOTSTRAP_MISSING")]
    bootstrap_missing: Option<String>,
}

impl RunArgs {
    /// Flag values keyed by the variable they override.
    fn overrides(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        let mut set = |var: &'static str, value: Option<String>| {
            if let Some(v) = value {
                vars.insert(var, v);
            }
        };
        set(ENV_DB_FILE, self.db_file.clone());
        set(ENV_LOG_FILE, self.log_file.clone());
        set(ENV_SCRAPE_URL, self.scrape_url.clone());
        set(ENV_BUCKET, self.bucket.clone());
        set(ENV_DISTRIBUTION_ID, self.distribution_id.clone());
        set(ENV_REFRESH_DISTRIBUTION, self.refresh_distribution.clone());
        set(ENV_SCRATCH_DIR, self.scratch_dir.as_ref().map(|p| p.to_string_lossy().into_owned()));
        set(ENV_BOOTSTRAP_MISSING, self.bootstrap_missing.clone());

        if self.local_store.is_some() {
            vars.insert(ENV_REFRESH_DISTRIBUTION, "false".to_owned());
            vars.entry(ENV_BUCKET).or_insert_with(|| LOCAL_BUCKET.to_owned());
        }
        vars
    }

    fn config(&self) -> Result<TrackerConfig> {
        let overrides = self.overrides();
        let config = TrackerConfig::from_lookup(|var| {
            overrides.get(var).cloned().or_else(|| std::env::var(var).ok())
        })?;
        Ok(config)
    }
}

/// Run the pipeline once and print the response. Returns whether it succeeded.
pub(crate) async fn run(args: RunArgs) -> Result<bool> {
    let config = args.config().context("invalid configuration")?;

    let (store, invalidator): (Arc<dyn ObjectStore>, Arc<dyn CacheInvalidator>) =
        if let Some(root) = &args.local_store {
            tracing::info!(root = %root.display(), "Using local object store");
            let store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(root));
            let invalidator: Arc<dyn CacheInvalidator> = Arc::new(DisabledInvalidator);
            (store, invalidator)
        } else {
            let sdk = load_sdk_config(config.http_timeout()).await;
            let store: Arc<dyn ObjectStore> =
                Arc::new(S3ObjectStore::from_config(&sdk, config.bucket.clone()));
            let invalidator: Arc<dyn CacheInvalidator> = match &config.distribution_id {
                Some(id) => Arc::new(CloudFrontInvalidator::from_config(&sdk, id.clone())),
                None => Arc::new(DisabledInvalidator),
            };
            (store, invalidator)
        };

    let pipeline = TrackerPipeline::new(config, store, invalidator)?;
    let response = pipeline.handle().await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.is_success())
}
