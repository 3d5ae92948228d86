use std::path::{Path, PathBuf};

use chrono::DateTime;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sale_tracker_core::constants::{CHART_HEIGHT, CHART_WIDTH};
use sale_tracker_core::{ChartSettings, Period};
use sale_tracker_storage::{Series, SeriesStore, SeriesSummary};

use crate::{RenderError, font};

/// Legend label of the plotted line.
const SERIES_LABEL: &str = "Sale Count";
/// Height of the legend strip under the plot, in pixels.
const LEGEND_HEIGHT: u32 = 96;
const FONT: &str = "sans-serif";

/// Renders the trend chart of each look-back window.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    settings: ChartSettings,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings) -> Result<Self, RenderError> {
        font::ensure_registered()?;
        Ok(Self { settings })
    }

    /// Render all five windows ending just before `now` into `out_dir`.
    /// Returns the written paths in period order.
    pub fn render_all<S: SeriesStore>(
        &self,
        store: &S,
        now: i64,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let mut written = Vec::with_capacity(Period::ALL.len());
        for period in Period::ALL {
            tracing::info!(%period, duration = period.duration_secs(), "Generating graph");
            let series = store.query(period.window_ending_at(now))?;
            let out = out_dir.join(period.chart_file_name());
            self.render(period, &series, &out)?;
            tracing::info!(%period, path = %out.display(), "Generated graph");
            written.push(out);
        }
        Ok(written)
    }

    /// Render one window's series as an 800×600 PNG at `out`.
    pub fn render(&self, period: Period, series: &Series, out: &Path) -> Result<(), RenderError> {
        let draw_err = |e: &dyn std::fmt::Display| RenderError::Draw {
            chart: period.chart_file_name(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(out, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err(&e))?;
        let (plot_area, legend_area) = root.split_vertically(CHART_HEIGHT - LEGEND_HEIGHT);

        let summary = series.summary();
        let (y_low, y_high) = y_bounds(&summary);
        let window = series.window;

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(self.settings.title(period), (FONT, 18).into_font())
            .margin(12)
            .x_label_area_size(32)
            .y_label_area_size(56)
            .build_cartesian_2d(window.start..window.end, y_low..y_high)
            .map_err(|e| draw_err(&e))?;

        chart
            .configure_mesh()
            .x_labels(6)
            .y_labels(8)
            .x_label_formatter(&|ts: &i64| tick_label(*ts, period))
            .y_label_formatter(&|v: &f64| format!("{v:.0}"))
            .draw()
            .map_err(|e| draw_err(&e))?;

        let line_style = RED.stroke_width(2);
        for segment in segments(series) {
            if let [single] = segment.as_slice() {
                chart
                    .draw_series(std::iter::once(Circle::new(*single, 2, RED.filled())))
                    .map_err(|e| draw_err(&e))?;
            } else {
                chart
                    .draw_series(LineSeries::new(segment, line_style))
                    .map_err(|e| draw_err(&e))?;
            }
        }

        self.draw_legend(&legend_area, &summary).map_err(|e| draw_err(&e))?;

        let watermark_style = (FONT, 12)
            .into_font()
            .color(&RGBColor(128, 128, 128))
            .pos(Pos::new(HPos::Right, VPos::Bottom));
        let (w, h) = root.dim_in_pixel();
        root.draw_text(&self.settings.watermark, &watermark_style, (w as i32 - 8, h as i32 - 6))
            .map_err(|e| draw_err(&e))?;

        root.present().map_err(|e| draw_err(&e))?;
        Ok(())
    }

    fn draw_legend<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, plotters::coord::Shift>,
        summary: &SeriesSummary,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let text = (FONT, 14).into_font().color(&BLACK);
        let left = 68;

        area.draw(&Rectangle::new([(left, 10), (left + 14, 22)], RED.filled()))?;
        area.draw_text(SERIES_LABEL, &text, (left + 22, 8))?;

        let lines = [
            format!("Min     {}", format_stat(summary.min)),
            format!("Max     {}", format_stat(summary.max)),
            format!("Average {}", format_stat(summary.average)),
        ];
        for (row, line) in (1_i32..).zip(lines.iter()) {
            area.draw_text(line, &text, (left, 8 + row * 18))?;
        }
        Ok(())
    }
}

/// Whole-number summary value right-aligned to six columns; `nan` when unknown.
fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:>6.0}"),
        None => format!("{:>6}", "nan"),
    }
}

/// Y range covering the summary with a little headroom; never below zero.
fn y_bounds(summary: &SeriesSummary) -> (f64, f64) {
    match (summary.min, summary.max) {
        (Some(min), Some(max)) if max > min => {
            let pad = (max - min) * 0.1;
            ((min - pad).max(0.0), max + pad)
        },
        (Some(min), Some(max)) => ((min - 1.0).max(0.0), max + 1.0),
        _ => (0.0, 1.0),
    }
}

/// Runs of consecutive known points; an unknown bucket breaks the line.
fn segments(series: &Series) -> Vec<Vec<(i64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for point in &series.points {
        match point.value {
            Some(v) => current.push((point.timestamp, v)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {},
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn tick_label(ts: i64, period: Period) -> String {
    let Some(t) = DateTime::from_timestamp(ts, 0) else {
        return String::new();
    };
    let pattern = match period {
        Period::Hour | Period::Day => "%H:%M",
        Period::Week => "%a %d",
        Period::Month => "%d %b",
        Period::Year => "%b %Y",
    };
    t.format(pattern).to_string()
}
