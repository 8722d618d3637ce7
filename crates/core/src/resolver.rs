//! Column resolution for product and task line-item tables.
//!
//! The stored column order is the skeleton. Defaults, tax tiers and custom
//! fields are merged into it, disabled features are removed, and the line
//! total is pinned last.

use std::collections::HashSet;

use crate::catalog::default_catalog;
use crate::model::{
    ColumnCatalogEntry, CompanyColumnPreferences, CustomFieldConfig, ItemKind,
    ResolvedColumnList, TaxConfig, MAX_TAX_TIERS,
};

/// Resolve the display columns for `kind`.
///
/// Never fails: an empty stored order seeds the default-visible catalog
/// columns, and keys this function has no rule for keep their stored
/// position. Feeding the output back in as the stored order, with the same
/// flags, yields the same list.
pub fn resolve(
    kind: ItemKind,
    prefs: &CompanyColumnPreferences,
    catalog: &[ColumnCatalogEntry],
    tax: TaxConfig,
    custom_fields: &CustomFieldConfig,
    discount_enabled: bool,
) -> ResolvedColumnList {
    let reference = prefs.stored_order.as_slice();
    let mut working = prefs.stored_order.clone();

    // A saved layout is authoritative: columns the user dropped stay dropped.
    if reference.is_empty() {
        seed_defaults(&mut working, catalog);
    }

    splice_taxes(kind, &mut working, reference, tax);

    if !discount_enabled {
        let discount = kind.discount_key();
        working.retain(|column| *column != discount);
    }

    apply_custom_fields(kind, &mut working, custom_fields);
    pin_line_total(kind, &mut working);

    ResolvedColumnList::new(dedup_first_wins(working))
}

/// [`resolve`] against the built-in catalog for `kind`.
pub fn resolve_with_default_catalog(
    kind: ItemKind,
    prefs: &CompanyColumnPreferences,
    tax: TaxConfig,
    custom_fields: &CustomFieldConfig,
    discount_enabled: bool,
) -> ResolvedColumnList {
    let catalog = default_catalog(kind);
    resolve(kind, prefs, &catalog, tax, custom_fields, discount_enabled)
}

/// Index of `key` in the stored order, or the end of `working` when the key
/// was never stored. Always a valid insertion index into `working`.
fn insertion_point(key: &str, reference: &[String], working: &[String]) -> usize {
    reference
        .iter()
        .position(|column| column == key)
        .unwrap_or(working.len())
        .min(working.len())
}

/// First run only: append the default-visible catalog columns in catalog order.
fn seed_defaults(working: &mut Vec<String>, catalog: &[ColumnCatalogEntry]) {
    for entry in catalog {
        if entry.default_visible && !working.contains(&entry.key) {
            working.push(entry.key.clone());
        }
    }
}

fn splice_taxes(kind: ItemKind, working: &mut Vec<String>, reference: &[String], tax: TaxConfig) {
    let placeholder = kind.tax_placeholder_key();
    // Computed before splicing so the whole block lands where the placeholder was stored.
    let at = insertion_point(&placeholder, reference, working);

    let enabled: Vec<String> = tax.tiers().map(|tier| kind.tax_rate_key(tier)).collect();
    working.splice(at..at, enabled);

    let disabled: Vec<String> = (tax.enabled_tier_count() + 1..=MAX_TAX_TIERS)
        .map(|tier| kind.tax_rate_key(tier))
        .collect();
    working.retain(|column| *column != placeholder && !disabled.contains(column));
}

fn apply_custom_fields(kind: ItemKind, working: &mut Vec<String>, custom_fields: &CustomFieldConfig) {
    for slot in CustomFieldConfig::slots() {
        let key = kind.custom_field_key(slot);
        if custom_fields.is_enabled(slot) {
            if !working.contains(&key) {
                working.push(key);
            }
        } else {
            working.retain(|column| *column != key);
        }
    }
}

fn pin_line_total(kind: ItemKind, working: &mut Vec<String>) {
    let line_total = kind.line_total_key();
    working.retain(|column| *column != line_total);
    working.push(line_total);
}

fn dedup_first_wins(columns: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| seen.insert(column.clone()))
        .collect()
}
