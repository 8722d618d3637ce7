pub mod catalog;
pub mod commands;
pub mod config;
pub mod model;
pub mod resolver;
pub mod services;
pub mod settings;

pub use commands::resolve_columns;
pub use config::AppConfig;
pub use model::*;
pub use resolver::{resolve, resolve_with_default_catalog};
pub use services::columns::ColumnSnapshot;
pub use services::ColumnsService;
pub use settings::{CompanySettings, SettingsError};
