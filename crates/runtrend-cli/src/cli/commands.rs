use crate::cli::args::ChartArgs;
use crate::exit_codes;
use runtrend_core::model::RunQuery;
use runtrend_core::plot::OutputFormat;
use runtrend_core::providers::github::GithubClient;
use runtrend_core::render::{self, ChartRequest, RenderOptions};
use std::path::PathBuf;
use std::time::Duration;

enum ChartKind {
    RunDuration,
    JobDuration,
}

impl ChartKind {
    fn default_stem(&self) -> &'static str {
        match self {
            ChartKind::RunDuration => "run-duration",
            ChartKind::JobDuration => "job-duration",
        }
    }
}

pub async fn cmd_run_duration(args: ChartArgs) -> anyhow::Result<i32> {
    render_chart(args, ChartKind::RunDuration).await
}

pub async fn cmd_job_duration(args: ChartArgs) -> anyhow::Result<i32> {
    render_chart(args, ChartKind::JobDuration).await
}

async fn render_chart(args: ChartArgs, kind: ChartKind) -> anyhow::Result<i32> {
    // validate the format before anything touches the network
    let format = OutputFormat::parse(&args.format)?;

    let out = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", kind.default_stem(), format.extension()))
    });

    let client = GithubClient::new(args.token.clone());
    let query = RunQuery {
        branch: args.branch.clone(),
        event: args.event.clone(),
        created: args.created.clone(),
    };
    let mut runs = client
        .fetch_completed_runs(&args.repo, &args.workflow, &query)
        .await?;
    tracing::info!(runs = runs.len(), "fetched completed workflow runs");

    let request = ChartRequest {
        repo: &args.repo,
        workflow: &args.workflow,
        format,
        out: &out,
        options: RenderOptions {
            verbose: args.verbose,
            pacing: Duration::from_millis(args.pacing_ms),
        },
    };
    let path = match kind {
        ChartKind::RunDuration => render::render_run_duration_trend(&mut runs, &request).await?,
        ChartKind::JobDuration => render::render_job_duration_trend(&mut runs, &request).await?,
    };

    eprintln!("wrote {}", path.display());
    Ok(exit_codes::OK)
}
