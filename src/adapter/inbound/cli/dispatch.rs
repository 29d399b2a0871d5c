//! Routes parsed commands to their handlers.

use crate::adapter::inbound::cli::command::Commands;
use crate::adapter::inbound::cli::{detect, history, init, scrape, snapshots};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Run one CLI command against the resolved configuration.
pub async fn execute(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Init => init::execute(config),
        Commands::Scrape(args) => scrape::execute(args, config).await,
        Commands::Detect(args) => detect::execute_detect(args, config).await,
        Commands::Find(args) => detect::execute_find(args, config).await,
        Commands::History(args) => history::execute(args, config).await,
        Commands::Snapshots(args) => snapshots::execute_list(args, config).await,
        Commands::Items(args) => snapshots::execute_items(args, config).await,
    }
}
