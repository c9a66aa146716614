use crate::errors::TrendError;
use crate::model::{RunSummary, RunUsage, WorkflowJob};
use crate::providers::RunClient;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// A fetched workflow run with two independently lazy sub-resources.
///
/// `jobs` and `usage` start out unloaded. Reading either before its
/// `load_*` call is a programming error and fails with
/// [`TrendError::NotLoaded`]; after the first successful load further
/// `load_*` calls are no-ops and perform no fetch.
pub struct WorkflowRun {
    summary: RunSummary,
    client: Arc<dyn RunClient>,
    jobs: Option<Vec<WorkflowJob>>,
    usage: Option<RunUsage>,
}

impl WorkflowRun {
    pub fn new(summary: RunSummary, client: Arc<dyn RunClient>) -> Self {
        Self {
            summary,
            client,
            jobs: None,
            usage: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.summary.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.summary.run_started_at
    }

    /// Row label: ISO-8601 start time plus the run id, which disambiguates
    /// runs that started in the same second.
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.summary
                .run_started_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            self.summary.id
        )
    }

    pub async fn load_jobs(&mut self) -> Result<(), TrendError> {
        if self.jobs.is_none() {
            self.jobs = Some(self.client.fetch_jobs(&self.summary).await?);
        }
        Ok(())
    }

    pub fn jobs(&self) -> Result<&[WorkflowJob], TrendError> {
        self.jobs.as_deref().ok_or(TrendError::NotLoaded {
            resource: "jobs",
            run_id: self.summary.id,
        })
    }

    pub async fn load_usage(&mut self) -> Result<(), TrendError> {
        if self.usage.is_none() {
            self.usage = Some(self.client.fetch_usage(&self.summary).await?);
        }
        Ok(())
    }

    pub fn usage(&self) -> Result<RunUsage, TrendError> {
        self.usage.ok_or(TrendError::NotLoaded {
            resource: "usage",
            run_id: self.summary.id,
        })
    }
}
