//! prlog - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prlog::action::{ActionConfig, ActionInputs, run};

/// Post a changelog comment on a pull request and compute the next version.
#[derive(Parser, Debug)]
#[command(name = "prlog")]
#[command(about = "Post a changelog comment on a pull request and compute the next version")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    inputs: ActionInputs,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config =
        ActionConfig::from_inputs(cli.inputs).context("Invalid action configuration")?;

    run(&config).await.context("Failed to generate changelog")?;

    Ok(())
}

/// Log to stderr so stdout stays free for dry-run output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
