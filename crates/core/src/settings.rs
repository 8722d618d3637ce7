//! Read-only view of the company settings document that drives column
//! resolution.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::model::{
    CompanyColumnPreferences, CustomFieldConfig, ItemKind, ResolvedColumnList, TaxConfig,
};
use crate::resolver::resolve_with_default_catalog;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read company settings at {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse company settings")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// Missing and `null` fields both read as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PdfVariables {
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_columns: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyPreferences {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pdf_variables: PdfVariables,
}

/// The subset of a company resource the column resolver reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanySettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: CompanyPreferences,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled_item_tax_rates: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_product_discount: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: HashMap<String, Option<String>>,
}

impl CompanySettings {
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn stored_columns(&self, kind: ItemKind) -> &[String] {
        let variables = &self.settings.pdf_variables;
        match kind {
            ItemKind::Product => &variables.product_columns,
            ItemKind::Task => &variables.task_columns,
        }
    }

    pub fn preferences(&self, kind: ItemKind) -> CompanyColumnPreferences {
        CompanyColumnPreferences::new(self.stored_columns(kind).iter().cloned())
    }

    pub fn tax_config(&self) -> TaxConfig {
        TaxConfig::new(self.enabled_item_tax_rates)
    }

    /// The discount flag covers both products and tasks.
    pub fn discount_enabled(&self) -> bool {
        self.enable_product_discount
    }

    pub fn custom_fields(&self, kind: ItemKind) -> CustomFieldConfig {
        CustomFieldConfig::slots().fold(CustomFieldConfig::default(), |fields, slot| {
            match self.custom_fields.get(&kind.custom_field_name(slot)) {
                Some(Some(label)) => fields.with_label(slot, label.clone()),
                _ => fields,
            }
        })
    }

    pub fn resolve_columns(&self, kind: ItemKind) -> ResolvedColumnList {
        resolve_with_default_catalog(
            kind,
            &self.preferences(kind),
            self.tax_config(),
            &self.custom_fields(kind),
            self.discount_enabled(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COMPANY: &str = r#"{
        "id": "VolejRejNm",
        "settings": {
            "currency_id": "1",
            "pdf_variables": {
                "product_columns": ["$product.item", "$product.tax", "$product.quantity", "$product.line_total"],
                "task_columns": ["$task.service", "$task.hours", "$task.line_total"]
            }
        },
        "enabled_item_tax_rates": 1,
        "enable_product_discount": true,
        "custom_fields": { "product1": "Colour", "product2": "", "task3": "Ticket", "client1": "Region" }
    }"#;

    #[test]
    fn parses_company_document_and_ignores_unknown_fields() {
        let company = CompanySettings::from_json(COMPANY).unwrap();
        assert_eq!(company.stored_columns(ItemKind::Task).len(), 3);
        assert_eq!(company.tax_config().enabled_tier_count(), 1);
        assert!(company.discount_enabled());

        let product_fields = company.custom_fields(ItemKind::Product);
        assert!(product_fields.is_enabled(1));
        assert!(!product_fields.is_enabled(2));
        assert!(company.custom_fields(ItemKind::Task).is_enabled(3));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let company = CompanySettings::from_json("{}").unwrap();
        assert!(company.stored_columns(ItemKind::Product).is_empty());
        assert_eq!(company.tax_config(), TaxConfig::new(0));
        assert!(!company.discount_enabled());
        assert_eq!(
            company.resolve_columns(ItemKind::Product).into_vec(),
            vec![
                "$product.item",
                "$product.unit_cost",
                "$product.quantity",
                "$product.line_total",
            ]
        );
    }

    #[test]
    fn null_columns_read_as_empty_skeleton() {
        let company = CompanySettings::from_json(
            r#"{"settings":{"pdf_variables":{"product_columns":null,"task_columns":null}}}"#,
        )
        .unwrap();
        assert!(company.stored_columns(ItemKind::Product).is_empty());
        assert!(company.stored_columns(ItemKind::Task).is_empty());
        assert_eq!(
            company.resolve_columns(ItemKind::Product).into_vec(),
            vec![
                "$product.item",
                "$product.unit_cost",
                "$product.quantity",
                "$product.line_total",
            ]
        );

        let company =
            CompanySettings::from_json(r#"{"settings":{"pdf_variables":null}}"#).unwrap();
        assert!(company.stored_columns(ItemKind::Task).is_empty());
        let company = CompanySettings::from_json(r#"{"settings":null}"#).unwrap();
        assert!(company.stored_columns(ItemKind::Task).is_empty());
    }

    #[test]
    fn null_tax_rates_and_discount_read_as_off() {
        let company = CompanySettings::from_json(
            r#"{"enabled_item_tax_rates":null,"enable_product_discount":null}"#,
        )
        .unwrap();
        assert_eq!(company.tax_config(), TaxConfig::new(0));
        assert!(!company.discount_enabled());
    }

    #[test]
    fn null_custom_fields_leave_slots_disabled() {
        let company = CompanySettings::from_json(
            r#"{"custom_fields":{"product1":null,"product2":"Colour","task1":null}}"#,
        )
        .unwrap();
        let fields = company.custom_fields(ItemKind::Product);
        assert!(!fields.is_enabled(1));
        assert!(fields.is_enabled(2));
        assert!(!company.custom_fields(ItemKind::Task).is_enabled(1));

        let company = CompanySettings::from_json(r#"{"custom_fields":null}"#).unwrap();
        assert!(!company.custom_fields(ItemKind::Product).is_enabled(1));
    }

    #[test]
    fn resolves_both_kinds_from_document() {
        let company = CompanySettings::from_json(COMPANY).unwrap();
        assert_eq!(
            company.resolve_columns(ItemKind::Product).into_vec(),
            vec![
                "$product.item",
                "$product.tax_rate1",
                "$product.quantity",
                "$product.product1",
                "$product.line_total",
            ]
        );
        assert_eq!(
            company.resolve_columns(ItemKind::Task).into_vec(),
            vec![
                "$task.service",
                "$task.hours",
                "$task.tax_rate1",
                "$task.task3",
                "$task.line_total",
            ]
        );
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("company.json");
        let err = CompanySettings::load(&missing).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().contains("company.json"));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = CompanySettings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn load_reads_document_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(COMPANY.as_bytes()).unwrap();
        let company = CompanySettings::load(file.path()).unwrap();
        assert_eq!(company, CompanySettings::from_json(COMPANY).unwrap());
    }
}
