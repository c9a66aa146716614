use super::RunClient;
use crate::errors::TrendError;
use crate::model::{RunQuery, RunSummary, RunUsage, WorkflowJob};
use crate::run::WorkflowRun;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

const GITHUB_API: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;

/// GitHub Actions REST client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Deserialize)]
struct RunsPage {
    total_count: usize,
    workflow_runs: Vec<RunSummary>,
}

#[derive(Deserialize)]
struct JobsPage {
    total_count: usize,
    jobs: Vec<WorkflowJob>,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, GITHUB_API)
    }

    /// Point the client at a different API root (GHES, test servers).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", concat!("runtrend/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", API_VERSION)
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // GitHub wraps diagnostics in a {"message": ...} envelope.
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
                .unwrap_or(body);
            anyhow::bail!("github api error {} for {}: {}", status, url, message);
        }
        Ok(resp.json().await?)
    }

    /// Lists the completed successful runs of a workflow, walking every page.
    pub async fn list_runs(
        &self,
        repo: &str,
        workflow: &str,
        query: &RunQuery,
    ) -> anyhow::Result<Vec<RunSummary>> {
        let url = format!(
            "{}/repos/{}/actions/workflows/{}/runs",
            self.base_url, repo, workflow
        );

        let mut runs: Vec<RunSummary> = Vec::new();
        let mut page = 1usize;
        loop {
            let mut params: Vec<(&str, String)> = vec![
                ("status", "success".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(branch) = &query.branch {
                params.push(("branch", branch.clone()));
            }
            if let Some(event) = &query.event {
                params.push(("event", event.clone()));
            }
            if let Some(created) = &query.created {
                params.push(("created", created.clone()));
            }

            let batch: RunsPage = self.get_json(&url, &params).await?;
            let fetched = batch.workflow_runs.len();
            runs.extend(batch.workflow_runs);
            tracing::debug!(page, fetched, total = batch.total_count, "fetched runs page");

            if fetched < PER_PAGE || runs.len() >= batch.total_count {
                break;
            }
            page += 1;
        }
        Ok(runs)
    }

    /// Fetches all completed runs of a workflow and wraps them as lazily
    /// loadable records backed by this client.
    pub async fn fetch_completed_runs(
        &self,
        repo: &str,
        workflow: &str,
        query: &RunQuery,
    ) -> Result<Vec<WorkflowRun>, TrendError> {
        tracing::info!(repo, workflow, "loading workflow runs");
        let summaries = self.list_runs(repo, workflow, query).await?;

        let client: Arc<dyn RunClient> = Arc::new(self.clone());
        Ok(summaries
            .into_iter()
            .map(|summary| WorkflowRun::new(summary, client.clone()))
            .collect())
    }
}

#[async_trait]
impl RunClient for GithubClient {
    async fn fetch_jobs(&self, run: &RunSummary) -> anyhow::Result<Vec<WorkflowJob>> {
        let mut jobs: Vec<WorkflowJob> = Vec::new();
        let mut page = 1usize;
        loop {
            let params = [
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: JobsPage = self.get_json(&run.jobs_url, &params).await?;
            let fetched = batch.jobs.len();
            jobs.extend(batch.jobs);

            if fetched < PER_PAGE || jobs.len() >= batch.total_count {
                break;
            }
            page += 1;
        }
        Ok(jobs)
    }

    async fn fetch_usage(&self, run: &RunSummary) -> anyhow::Result<RunUsage> {
        self.get_json(&format!("{}/timing", run.url), &[]).await
    }
}
