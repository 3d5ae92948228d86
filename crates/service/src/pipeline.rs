use std::path::PathBuf;
use std::sync::Arc;

use sale_tracker_cloud::{CacheInvalidator, ObjectStore};
use sale_tracker_core::{Observation, RunResponse, TrackerConfig, unix_now};
use sale_tracker_render::ChartRenderer;
use sale_tracker_scrape::CountScraper;
use sale_tracker_storage::{SampleLog, SeriesUpdater, SqliteSeriesStore};

use crate::{ServiceError, StateFetcher, StatePublisher, invalidate_charts};

/// One invocation of the tracker: fetch → scrape → update → render → publish → invalidate.
pub struct TrackerPipeline {
    config: TrackerConfig,
    scraper: CountScraper,
    renderer: ChartRenderer,
    fetcher: StateFetcher,
    publisher: StatePublisher,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl TrackerPipeline {
    pub fn new(
        config: TrackerConfig,
        store: Arc<dyn ObjectStore>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Result<Self, ServiceError> {
        let scraper = CountScraper::new(config.http_timeout())?;
        let renderer = ChartRenderer::new(config.chart.clone())?;
        let fetcher =
            StateFetcher::new(Arc::clone(&store), &config.scratch_dir, config.bootstrap_missing);
        let publisher = StatePublisher::new(store);
        Ok(Self { config, scraper, renderer, fetcher, publisher, invalidator })
    }

    /// Run once and fold every failure into a 500 response.
    pub async fn handle(&self) -> RunResponse {
        match self.run().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                RunResponse::failure(format!("Run failed: {e}"))
            },
        }
    }

    /// Run once. A page without a count yields a 500 response without
    /// touching the store or the log; operational failures are errors.
    pub async fn run(&self) -> Result<RunResponse, ServiceError> {
        let cfg = &self.config;
        tracing::info!(version = %cfg.version, url = %cfg.scrape_url, "Starting tracker run");

        let fetched = self.fetcher.fetch(&[cfg.db_file.as_str(), cfg.log_file.as_str()]).await?;
        tracing::info!(?fetched, "Fetched remote state");

        let Some(count) = self.scraper.fetch_count(&cfg.scrape_url).await? else {
            return Ok(RunResponse::failure(format!(
                "Failed to update time-series store. H1 value was not found in |{}|",
                cfg.scrape_url
            )));
        };

        let observation = Observation::new(unix_now(), count);
        let charts = self.record_and_render(observation).await?;
        tracing::info!(charts = charts.len(), "Rendered charts");

        self.publisher.publish(&cfg.scratch_dir, &cfg.artifact_names()).await?;

        let outcome = invalidate_charts(self.invalidator.as_ref(), cfg.refresh_distribution).await;

        Ok(RunResponse::ok(format!(
            "Successfully updated time-series store, generated graphs. {}",
            outcome.message()
        )))
    }

    /// Append the observation to store and log, then redraw every chart.
    /// Charts end at the new sample so it is always plotted.
    async fn record_and_render(&self, observation: Observation) -> Result<Vec<PathBuf>, ServiceError> {
        let db_path = self.config.db_path();
        let log_path = self.config.log_path();
        let scratch_dir = self.config.scratch_dir.clone();
        let renderer = self.renderer.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>, ServiceError> {
            let store = SqliteSeriesStore::open(&db_path)?;
            let mut updater = SeriesUpdater::new(store, SampleLog::new(log_path));
            updater.record(observation)?;
            let charts =
                renderer.render_all(updater.store(), observation.timestamp + 1, &scratch_dir)?;
            Ok(charts)
        })
        .await?
    }
}
