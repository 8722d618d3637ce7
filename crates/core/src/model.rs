use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Highest number of tax tiers a line item can carry.
pub const MAX_TAX_TIERS: u8 = 3;

/// Number of custom-field slots available per item kind.
pub const CUSTOM_FIELD_SLOTS: u8 = 4;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Product,
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Product => "product",
            ItemKind::Task => "task",
        }
    }

    /// Prefix shared by every column key of this kind, e.g. `$product.`.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            ItemKind::Product => "$product.",
            ItemKind::Task => "$task.",
        }
    }

    /// Build the full column key for a bare field name.
    pub fn key(&self, field: &str) -> String {
        format!("{}{}", self.key_prefix(), field)
    }

    pub fn tax_placeholder_key(&self) -> String {
        self.key("tax")
    }

    pub fn tax_rate_key(&self, tier: u8) -> String {
        self.key(&format!("tax_rate{}", tier))
    }

    pub fn discount_key(&self) -> String {
        self.key("discount")
    }

    pub fn line_total_key(&self) -> String {
        self.key("line_total")
    }

    /// Name of the company custom field backing `slot`, e.g. `product1`.
    pub fn custom_field_name(&self, slot: u8) -> String {
        format!("{}{}", self.as_str(), slot)
    }

    pub fn custom_field_key(&self, slot: u8) -> String {
        self.key(&self.custom_field_name(slot))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "products" => Ok(ItemKind::Product),
            "task" | "tasks" => Ok(ItemKind::Task),
            other => Err(anyhow!(
                "Unknown item kind '{}': expected product|task",
                other
            )),
        }
    }
}

impl ValueEnum for ItemKind {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [ItemKind; 2] = [ItemKind::Product, ItemKind::Task];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCatalogEntry {
    pub key: String,
    pub default_visible: bool,
}

impl ColumnCatalogEntry {
    pub fn new(key: impl Into<String>, default_visible: bool) -> Self {
        Self {
            key: key.into(),
            default_visible,
        }
    }
}

/// Persisted column order for one item kind. Owned by the company settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyColumnPreferences {
    pub stored_order: Vec<String>,
}

impl CompanyColumnPreferences {
    pub fn new<I, S>(stored_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stored_order: stored_order.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ResolvedColumnList> for CompanyColumnPreferences {
    fn from(resolved: ResolvedColumnList) -> Self {
        Self {
            stored_order: resolved.into_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxConfig {
    enabled_tier_count: u8,
}

impl TaxConfig {
    /// Build a tax config, clamping the tier count into `0..=3`.
    pub fn new(enabled_tier_count: i64) -> Self {
        Self {
            enabled_tier_count: enabled_tier_count.clamp(0, i64::from(MAX_TAX_TIERS)) as u8,
        }
    }

    pub fn enabled_tier_count(&self) -> u8 {
        self.enabled_tier_count
    }

    /// Enabled tiers in order, starting at 1.
    pub fn tiers(&self) -> impl Iterator<Item = u8> {
        1..=self.enabled_tier_count
    }

    pub fn is_tier_enabled(&self, tier: u8) -> bool {
        (1..=self.enabled_tier_count).contains(&tier)
    }
}

/// Labels of the custom-field slots `1..=4`. A slot is enabled when it has a
/// non-empty label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldConfig {
    labels: [Option<String>; CUSTOM_FIELD_SLOTS as usize],
}

impl CustomFieldConfig {
    /// Set the label of `slot`. Slots outside `1..=4` are ignored.
    pub fn with_label(mut self, slot: u8, label: impl Into<String>) -> Self {
        if let Some(index) = slot_index(slot) {
            self.labels[index] = Some(label.into());
        }
        self
    }

    pub fn label(&self, slot: u8) -> Option<&str> {
        slot_index(slot).and_then(|index| self.labels[index].as_deref())
    }

    pub fn is_enabled(&self, slot: u8) -> bool {
        self.label(slot)
            .map(|label| !label.is_empty())
            .unwrap_or(false)
    }

    pub fn slots() -> impl Iterator<Item = u8> {
        1..=CUSTOM_FIELD_SLOTS
    }
}

fn slot_index(slot: u8) -> Option<usize> {
    if (1..=CUSTOM_FIELD_SLOTS).contains(&slot) {
        Some(usize::from(slot - 1))
    } else {
        None
    }
}

/// Final column order handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedColumnList(Vec<String>);

impl ResolvedColumnList {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|column| column == key)
    }
}

impl<'a> IntoIterator for &'a ResolvedColumnList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A column key split into its item kind and bare field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnKey<'a> {
    pub kind: ItemKind,
    pub field: &'a str,
}

impl<'a> ColumnKey<'a> {
    /// Split `$product.unit_cost` into `(Product, "unit_cost")`. Keys of any
    /// other shape return `None`.
    pub fn parse(key: &'a str) -> Option<Self> {
        [ItemKind::Product, ItemKind::Task]
            .into_iter()
            .find_map(|kind| {
                key.strip_prefix(kind.key_prefix())
                    .filter(|field| !field.is_empty())
                    .map(|field| ColumnKey { kind, field })
            })
    }
}
