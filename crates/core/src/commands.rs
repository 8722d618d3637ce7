use anyhow::Result;

use crate::catalog::default_catalog;
use crate::config::AppConfig;
use crate::model::{ColumnCatalogEntry, ItemKind};
use crate::services::columns::{ColumnSnapshot, ColumnsService};

/// Resolve the line-item columns of `kind` from the configured settings document.
pub fn resolve_columns(config: &AppConfig, kind: ItemKind) -> Result<ColumnSnapshot> {
    ColumnsService::new(config.clone()).resolve(kind)
}

/// The built-in default columns of `kind`, in catalog order.
pub fn catalog(kind: ItemKind) -> Vec<ColumnCatalogEntry> {
    default_catalog(kind)
}
