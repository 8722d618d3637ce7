use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::model::{ItemKind, ResolvedColumnList};
use crate::settings::CompanySettings;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSnapshot {
    pub kind: ItemKind,
    #[serde(skip)]
    pub stored: Vec<String>,
    pub columns: ResolvedColumnList,
}

impl ColumnSnapshot {
    /// Whether resolution changed the stored order, i.e. the caller may want to persist it.
    pub fn differs_from_stored(&self) -> bool {
        self.columns.as_slice() != self.stored.as_slice()
    }
}

#[derive(Debug, Clone)]
pub struct ColumnsService {
    config: AppConfig,
}

impl ColumnsService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve columns for `kind` from the current settings document. The document is
    /// re-read on every call so edits made elsewhere are picked up.
    pub fn resolve(&self, kind: ItemKind) -> Result<ColumnSnapshot> {
        let company = self.load_settings()?;
        let stored = company.stored_columns(kind).to_vec();
        let columns = company.resolve_columns(kind);

        tracing::debug!(
            kind = kind.as_str(),
            stored = stored.len(),
            resolved = columns.len(),
            "resolved line item columns"
        );

        Ok(ColumnSnapshot {
            kind,
            stored,
            columns,
        })
    }

    fn load_settings(&self) -> Result<CompanySettings> {
        let path = self.config.settings_path();
        tracing::debug!(path = %path.display(), "loading company settings");
        CompanySettings::load(path).with_context(|| {
            format!("failed to load company settings from {}", path.display())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn service_with_document(raw: &str) -> (ColumnsService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("company.json");
        std::fs::write(&path, raw).unwrap();
        let service = ColumnsService::new(AppConfig::from_settings_path(path));
        (service, temp_dir)
    }

    #[test]
    fn resolves_from_settings_on_disk() {
        let (service, _guard) = service_with_document(
            r#"{"settings":{"pdf_variables":{"task_columns":["$task.service","$task.discount","$task.hours","$task.line_total"]}}}"#,
        );
        let snapshot = service.resolve(ItemKind::Task).unwrap();
        assert_eq!(
            snapshot.columns.into_vec(),
            vec!["$task.service", "$task.hours", "$task.line_total"]
        );
    }

    #[test]
    fn reports_changes_against_stored_order() {
        let (service, _guard) = service_with_document(
            r#"{"enable_product_discount":true,"settings":{"pdf_variables":{"product_columns":["$product.item","$product.line_total"]}}}"#,
        );
        let snapshot = service.resolve(ItemKind::Product).unwrap();
        assert!(!snapshot.differs_from_stored());

        let snapshot = service.resolve(ItemKind::Task).unwrap();
        assert!(snapshot.differs_from_stored());
    }

    #[test]
    fn picks_up_document_changes_between_calls() {
        let (service, _guard) = service_with_document("{}");
        assert!(!service
            .resolve(ItemKind::Product)
            .unwrap()
            .columns
            .contains("$product.tax_rate1"));

        std::fs::write(service.config().settings_path(), r#"{"enabled_item_tax_rates":1}"#)
            .unwrap();
        assert!(service
            .resolve(ItemKind::Product)
            .unwrap()
            .columns
            .contains("$product.tax_rate1"));
    }

    #[test]
    fn missing_document_is_an_error_with_context() {
        let temp_dir = TempDir::new().unwrap();
        let service =
            ColumnsService::new(AppConfig::from_settings_path(temp_dir.path().join("absent.json")));
        let err = service.resolve(ItemKind::Product).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
