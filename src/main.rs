//! pr-group CLI entry point

mod cli;

use clap::Parser;
use pr_group::actions::error_annotation;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge labeled pull requests into an integration branch for grouped CI builds
#[derive(Debug, Parser)]
#[command(name = "pr-group", version, about)]
struct Cli {
    #[command(flatten)]
    run: cli::RunArgs,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Cli::parse();

    match cli::run_command(args.run).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Workflow commands are read from stdout
            println!("{}", error_annotation(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
