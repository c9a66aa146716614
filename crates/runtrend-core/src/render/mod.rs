use crate::errors::TrendError;
use crate::plot::{self, OutputFormat};
use crate::run::WorkflowRun;
use crate::table::Table;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod job_duration;
pub mod run_duration;

/// Title and axis labels for a rendered chart.
#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

/// Aggregation knobs.
///
/// `verbose` replaces the environment-driven debug printing of the early
/// prototypes; `pacing` is the fixed delay inserted between successive
/// upstream loads. Loads are strictly sequential.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub verbose: bool,
    pub pacing: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            pacing: Duration::from_millis(300),
        }
    }
}

/// One trend aggregation: loads what it needs from each run and emits the
/// chartable table.
#[async_trait]
pub trait TrendRenderer: Send + Sync {
    fn labels(&self) -> &ChartLabels;

    /// Sorts the runs by start time, loads sub-resources one run at a time
    /// and builds the table. Fails as a whole on the first load error;
    /// never emits a partial table.
    async fn render(&self, runs: &mut [WorkflowRun]) -> Result<Table, TrendError>;
}

/// Everything a caller-facing render needs besides the runs themselves.
#[derive(Debug, Clone)]
pub struct ChartRequest<'a> {
    pub repo: &'a str,
    pub workflow: &'a str,
    pub format: OutputFormat,
    pub out: &'a Path,
    pub options: RenderOptions,
}

/// Renders the single-series run duration trend to `req.out` via gnuplot.
pub async fn render_run_duration_trend(
    runs: &mut [WorkflowRun],
    req: &ChartRequest<'_>,
) -> Result<PathBuf, TrendError> {
    let renderer =
        run_duration::RunDurationTrend::new(req.repo, req.workflow).with_options(req.options.clone());
    plot::create_chart(
        &plot::gnuplot::Gnuplot::default(),
        &renderer,
        runs,
        req.format,
        req.out,
    )
    .await
}

/// Renders the stacked per-job duration trend to `req.out` via gnuplot.
pub async fn render_job_duration_trend(
    runs: &mut [WorkflowRun],
    req: &ChartRequest<'_>,
) -> Result<PathBuf, TrendError> {
    let renderer =
        job_duration::JobDurationTrend::new(req.repo, req.workflow).with_options(req.options.clone());
    plot::create_chart(
        &plot::gnuplot::Gnuplot::default(),
        &renderer,
        runs,
        req.format,
        req.out,
    )
    .await
}
