use super::{ChartLabels, RenderOptions, TrendRenderer};
use crate::errors::TrendError;
use crate::run::WorkflowRun;
use crate::table::Table;
use async_trait::async_trait;

/// Single-series trend: total wall-clock duration per run, in minutes.
pub struct RunDurationTrend {
    labels: ChartLabels,
    options: RenderOptions,
}

impl RunDurationTrend {
    pub fn new(repo: &str, workflow: &str) -> Self {
        Self {
            labels: ChartLabels {
                title: format!("Workflow Run Duration Trend ({} - {})", repo, workflow),
                xlabel: "Date time".to_string(),
                ylabel: "Workflow run duration [min]".to_string(),
            },
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl TrendRenderer for RunDurationTrend {
    fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    async fn render(&self, runs: &mut [WorkflowRun]) -> Result<Table, TrendError> {
        runs.sort_by_key(|run| run.started_at());

        let total = runs.len();
        for (i, run) in runs.iter_mut().enumerate() {
            if self.options.verbose {
                eprintln!(
                    "loading usage of workflow run {} ({}/{})",
                    run.id(),
                    i + 1,
                    total
                );
            }
            run.load_usage().await?;
            if i + 1 < total {
                tokio::time::sleep(self.options.pacing).await;
            }
        }

        let mut table = Table::new(vec![
            "Date time".to_string(),
            "Workflow run duration".to_string(),
        ]);
        for run in runs.iter() {
            let usage = run.usage()?;
            table.push_row(run.label(), vec![usage.run_duration_ms as f64 / 60_000.0]);
        }
        Ok(table)
    }
}
