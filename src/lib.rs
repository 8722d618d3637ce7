pub use linecols_cli::cli;
pub use linecols_cli::commands;
pub use linecols_cli::config;
pub use linecols_cli::logging;
pub use linecols_cli::AppConfig;

pub use linecols_core as core;
pub use linecols_core::catalog;
pub use linecols_core::model;
pub use linecols_core::resolver;
pub use linecols_core::settings;
