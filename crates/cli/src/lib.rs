pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use linecols_core as core;
pub use linecols_core::model;

pub use linecols_core::AppConfig;
