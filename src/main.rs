//! docker-facts entry point
//!
//! Reads the step inputs, derives the build facts and writes them as step
//! outputs.

use clap::Parser;
use docker_facts::cli::Cli;
use docker_facts::config::Config;
use docker_facts::facts;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the output fallback
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let build_facts = facts::resolve(&config);
    facts::export(&build_facts, &config, &mut std::io::stdout().lock())?;

    Ok(())
}
