use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use webmap::cli::Args;
use webmap::output;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    if let Err(e) = args.execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "warn,webmap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
