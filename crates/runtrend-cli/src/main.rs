use clap::Parser;
use runtrend_core::errors::TrendError;

mod cli;

use cli::args::{Cli, Command};

mod exit_codes {
    pub const OK: i32 = 0;
    pub const RENDER_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_code_for(&e)
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::RunDuration(args) => {
            init_logging(args.verbose);
            cli::commands::cmd_run_duration(args).await
        }
        Command::JobDuration(args) => {
            init_logging(args.verbose);
            cli::commands::cmd_job_duration(args).await
        }
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TrendError>() {
        Some(TrendError::InvalidFormat(_)) => exit_codes::CONFIG_ERROR,
        _ => exit_codes::RENDER_FAILED,
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("runtrend=debug,runtrend_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
