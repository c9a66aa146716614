use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One workflow run as returned by the runs listing endpoint. Only the
/// fields the pipeline consumes are kept; the rest of the payload is
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSummary {
    pub id: u64,
    pub run_started_at: DateTime<Utc>,
    /// Canonical API URL of the run; the timing endpoint hangs off it.
    pub url: String,
    /// Link to the run's job listing.
    pub jobs_url: String,
}

/// A named unit of work within a run. Job names are unique within a single
/// run's job set, not across runs. Runs are pre-filtered to success
/// upstream, so both timestamps are always present.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowJob {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Wall-clock timing summary for an entire run.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RunUsage {
    pub run_duration_ms: u64,
}

/// Optional pass-through filters for the runs listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct RunQuery {
    pub branch: Option<String>,
    pub event: Option<String>,
    /// Date range filter, e.g. `>=2024-01-01`.
    pub created: Option<String>,
}
