pub use linecols_core::config::*;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> anyhow::Result<AppConfig> {
    AppConfig::discover(cli.settings.clone())
}
