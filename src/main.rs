//! cachefly-provider - Main entry point

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use cachefly_provider::{run_command, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting cachefly-provider v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: base_url={:?}, output={}, batch={}, no_header={}",
        cli.base_url, cli.output, cli.batch, cli.no_header
    );

    match run_command(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
