use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use sale_tracker_core::{ChartSettings, unix_now};
use sale_tracker_render::ChartRenderer;
use sale_tracker_storage::{SampleLog, SqliteSeriesStore};

pub(crate) async fn run_render(db: PathBuf, out: PathBuf, now: Option<i64>) -> Result<()> {
    if !db.is_file() {
        bail!("series database not found: {}", db.display());
    }

    let written = tokio::task::spawn_blocking(move || -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&out)?;
        let store = SqliteSeriesStore::open(&db)?;
        let now = now.or_else(|| store.last_update().map(|ts| ts + 1)).unwrap_or_else(unix_now);
        let renderer = ChartRenderer::new(ChartSettings::default())?;
        Ok(renderer.render_all(&store, now, &out)?)
    })
    .await??;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

pub(crate) fn run_tail(log: &Path, limit: usize) -> Result<()> {
    let records = SampleLog::new(log).tail(limit)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
