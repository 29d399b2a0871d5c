//! Handler for the `init` command.

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_store;

/// Create the database file if needed and apply pending migrations.
pub fn execute(config: &Config) -> Result<()> {
    build_store(config)?;
    output::success(&format!(
        "Database initialized at {}",
        output::highlight(&config.database)
    ));
    Ok(())
}
