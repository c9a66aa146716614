use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "runtrend",
    version,
    about = "Duration trend charts for GitHub Actions workflows"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Chart the total duration of each run over time
    RunDuration(ChartArgs),
    /// Chart per-job durations over time, stacked
    JobDuration(ChartArgs),
    Version,
}

#[derive(Parser, Clone)]
pub struct ChartArgs {
    /// repository in owner/name form
    #[arg(long)]
    pub repo: String,

    /// workflow file name or numeric id, e.g. ci.yml
    #[arg(long)]
    pub workflow: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// output format: png|svg
    #[arg(long, default_value = "svg")]
    pub format: String,

    /// output path (default: <chart kind>.<format>)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// only chart runs on this branch
    #[arg(long)]
    pub branch: Option<String>,

    /// only chart runs triggered by this event, e.g. push
    #[arg(long)]
    pub event: Option<String>,

    /// created date filter, e.g. ">=2024-01-01"
    #[arg(long)]
    pub created: Option<String>,

    /// delay between successive API loads, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub pacing_ms: u64,

    /// print per-run load progress
    #[arg(long)]
    pub verbose: bool,
}
