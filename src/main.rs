use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_probe::{RunnerConfig, cli::Cli, core};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunnerConfig::from_env(cli.transport, cli.tool, cli.tool_args);

    // Clean skips already printed their diagnostic; only transport errors
    // bubble up as a failing exit.
    let _outcome = core::run(&config).await?;
    Ok(())
}
