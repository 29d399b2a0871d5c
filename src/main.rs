use std::process::ExitCode;

use arbitrack::adapter::inbound::cli::command::Cli;
use arbitrack::adapter::inbound::cli::dispatch;
use arbitrack::adapter::inbound::cli::output::{self, OutputConfig};
use arbitrack::error::Error;
use arbitrack::infrastructure::config::settings::Config;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.quiet, cli.verbose));

    let mut config = match Config::resolve(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            return ExitCode::FAILURE;
        }
    };
    if cli.verbose > 0 {
        config.logging.level = "debug".to_string();
    }
    config.init_logging();
    debug!(database = %config.database, "arbitrack starting");

    match dispatch::execute(&cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Command failed");
            output::error(&e.to_string());
            if let Error::EmptySnapshot { .. } = e {
                output::hint("check the URLs, or run with -v for details");
            }
            ExitCode::FAILURE
        }
    }
}
