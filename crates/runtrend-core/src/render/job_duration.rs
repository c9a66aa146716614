use super::{ChartLabels, RenderOptions, TrendRenderer};
use crate::errors::TrendError;
use crate::run::WorkflowRun;
use crate::table::Table;
use async_trait::async_trait;

/// Stacked multi-series trend: per-job durations within each run, in
/// minutes.
///
/// Columns are the union of job names across all runs, in first-discovery
/// order over the sorted runs. A run without a given job contributes 0.0 to
/// that column; duplicate names within one run resolve to the first match.
pub struct JobDurationTrend {
    labels: ChartLabels,
    options: RenderOptions,
}

impl JobDurationTrend {
    pub fn new(repo: &str, workflow: &str) -> Self {
        Self {
            labels: ChartLabels {
                title: format!("Cumulative Job Duration Trend ({} - {})", repo, workflow),
                xlabel: "Date time".to_string(),
                ylabel: "Jobs duration time [min]".to_string(),
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
impl TrendRenderer for JobDurationTrend {
    fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    async fn render(&self, runs: &mut [WorkflowRun]) -> Result<Table, TrendError> {
        runs.sort_by_key(|run| run.started_at());

        let total = runs.len();
        for (i, run) in runs.iter_mut().enumerate() {
            if self.options.verbose {
                eprintln!(
                    "loading jobs of workflow run {} ({}/{})",
                    run.id(),
                    i + 1,
                    total
                );
            }
            run.load_jobs().await?;
            if i + 1 < total {
                tokio::time::sleep(self.options.pacing).await;
            }
        }

        let mut job_names: Vec<String> = Vec::new();
        for run in runs.iter() {
            for job in run.jobs()? {
                if !job_names.iter().any(|name| name == &job.name) {
                    job_names.push(job.name.clone());
                }
            }
        }

        let mut header = Vec::with_capacity(job_names.len() + 1);
        header.push("Date time".to_string());
        header.extend(job_names.iter().cloned());
        let mut table = Table::new(header);

        for run in runs.iter() {
            let jobs = run.jobs()?;
            let values = job_names
                .iter()
                .map(|name| {
                    jobs.iter()
                        .find(|job| &job.name == name)
                        .map(|job| {
                            (job.completed_at - job.started_at).num_milliseconds() as f64
                                / 60_000.0
                        })
                        .unwrap_or(0.0)
                })
                .collect();
            table.push_row(run.label(), values);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RunSummary, RunUsage, WorkflowJob};
    use crate::providers::RunClient;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    struct JobsStub {
        jobs_by_run: HashMap<u64, Vec<WorkflowJob>>,
    }

    #[async_trait]
    impl RunClient for JobsStub {
        async fn fetch_jobs(&self, run: &RunSummary) -> anyhow::Result<Vec<WorkflowJob>> {
            Ok(self.jobs_by_run[&run.id].clone())
        }

        async fn fetch_usage(&self, _run: &RunSummary) -> anyhow::Result<RunUsage> {
            unimplemented!("not exercised by this trend")
        }
    }

    fn job(name: &str, started: &str, completed: &str) -> WorkflowJob {
        WorkflowJob {
            name: name.into(),
            started_at: started.parse().unwrap(),
            completed_at: completed.parse().unwrap(),
        }
    }

    fn run(id: u64, started: &str, client: &Arc<JobsStub>) -> WorkflowRun {
        WorkflowRun::new(
            RunSummary {
                id,
                run_started_at: started.parse().unwrap(),
                url: format!("https://api.invalid/runs/{id}"),
                jobs_url: format!("https://api.invalid/runs/{id}/jobs"),
            },
            client.clone(),
        )
    }

    fn quick() -> RenderOptions {
        RenderOptions {
            verbose: false,
            pacing: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn columns_are_the_union_of_job_names_zero_filled() {
        let client = Arc::new(JobsStub {
            jobs_by_run: HashMap::from([
                (
                    1,
                    vec![
                        job("A", "2024-05-01T09:00:00Z", "2024-05-01T09:05:00Z"),
                        job("B", "2024-05-01T09:05:00Z", "2024-05-01T09:08:00Z"),
                    ],
                ),
                (
                    2,
                    vec![job("A", "2024-05-01T09:10:00Z", "2024-05-01T09:14:00Z")],
                ),
            ]),
        });
        let mut runs = vec![
            run(1, "2024-05-01T09:00:00Z", &client),
            run(2, "2024-05-01T09:10:00Z", &client),
        ];

        let renderer = JobDurationTrend::new("acme/app", "ci.yml").with_options(quick());
        let table = renderer.render(&mut runs).await.unwrap();

        assert_eq!(table.header, vec!["Date time", "A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values, vec![5.0, 3.0]);
        assert_eq!(table.rows[1].values, vec![4.0, 0.0]);
    }

    #[tokio::test]
    async fn column_order_follows_first_discovery_over_sorted_runs() {
        let client = Arc::new(JobsStub {
            jobs_by_run: HashMap::from([
                (
                    1,
                    vec![job("deploy", "2024-05-01T08:00:00Z", "2024-05-01T08:02:00Z")],
                ),
                (
                    2,
                    vec![
                        job("build", "2024-05-01T09:00:00Z", "2024-05-01T09:01:00Z"),
                        job("deploy", "2024-05-01T09:01:00Z", "2024-05-01T09:03:00Z"),
                    ],
                ),
            ]),
        });
        // input order is reversed on purpose; discovery follows start time
        let mut runs = vec![
            run(2, "2024-05-01T09:00:00Z", &client),
            run(1, "2024-05-01T08:00:00Z", &client),
        ];

        let renderer = JobDurationTrend::new("acme/app", "ci.yml").with_options(quick());
        let table = renderer.render(&mut runs).await.unwrap();

        assert_eq!(table.header, vec!["Date time", "deploy", "build"]);
        assert_eq!(table.rows[0].values, vec![2.0, 0.0]);
        assert_eq!(table.rows[1].values, vec![2.0, 1.0]);
    }

    #[tokio::test]
    async fn duplicate_job_names_within_a_run_use_the_first_match() {
        let client = Arc::new(JobsStub {
            jobs_by_run: HashMap::from([(
                1,
                vec![
                    job("test", "2024-05-01T09:00:00Z", "2024-05-01T09:02:00Z"),
                    job("test", "2024-05-01T09:02:00Z", "2024-05-01T09:09:00Z"),
                ],
            )]),
        });
        let mut runs = vec![run(1, "2024-05-01T09:00:00Z", &client)];

        let renderer = JobDurationTrend::new("acme/app", "ci.yml").with_options(quick());
        let table = renderer.render(&mut runs).await.unwrap();

        assert_eq!(table.header, vec!["Date time", "test"]);
        assert_eq!(table.rows[0].values, vec![2.0]);
    }

    #[test]
    fn title_names_repo_and_workflow() {
        let renderer = JobDurationTrend::new("acme/app", "ci.yml");
        assert_eq!(
            renderer.labels().title,
            "Cumulative Job Duration Trend (acme/app - ci.yml)"
        );
        assert_eq!(renderer.labels().ylabel, "Jobs duration time [min]");
    }
}
