use crate::model::{RunSummary, RunUsage, WorkflowJob};
use async_trait::async_trait;

pub mod github;

/// On-demand loader for a run's sub-resources.
///
/// Implementations own transport, auth and pagination. Load-once semantics
/// live in [`crate::run::WorkflowRun`], not here.
#[async_trait]
pub trait RunClient: Send + Sync {
    async fn fetch_jobs(&self, run: &RunSummary) -> anyhow::Result<Vec<WorkflowJob>>;

    async fn fetch_usage(&self, run: &RunSummary) -> anyhow::Result<RunUsage>;
}
