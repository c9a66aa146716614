use thiserror::Error;

/// Errors surfaced by the trend pipeline.
///
/// Aggregation and rendering are all-or-nothing: every variant aborts the
/// current invocation and none is ever downgraded to a warning.
#[derive(Debug, Error)]
pub enum TrendError {
    /// A lazily loaded sub-resource was read before its `load_*` call.
    #[error("{resource} of workflow run {run_id} accessed before load")]
    NotLoaded {
        resource: &'static str,
        run_id: u64,
    },

    /// The run loader collaborator failed (network, auth, rate limit).
    /// Retry policy, if any, belongs to the collaborator.
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] anyhow::Error),

    /// The caller asked for an output format the plot engine does not
    /// support. Raised before any loading starts.
    #[error("unsupported output format: {0} (expected png or svg)")]
    InvalidFormat(String),

    /// The external plot engine exited non-zero.
    #[error("plot engine exited with status {status}: {stderr}")]
    RenderEngine { status: i32, stderr: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
