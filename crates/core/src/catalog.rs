//! Built-in default columns for each line-item kind.

use crate::model::{ColumnCatalogEntry, ItemKind};

/// Bare field names and default visibility, in catalog order.
const PRODUCT_COLUMNS: [(&str, bool); 5] = [
    ("item", true),
    ("description", false),
    ("unit_cost", true),
    ("discount", true),
    ("quantity", true),
];

const TASK_COLUMNS: [(&str, bool); 5] = [
    ("service", true),
    ("description", false),
    ("rate", true),
    ("discount", true),
    ("hours", true),
];

/// The fixed default catalog for `kind`: primary label, description,
/// rate/cost, discount and quantity/hours.
pub fn default_catalog(kind: ItemKind) -> Vec<ColumnCatalogEntry> {
    let fields = match kind {
        ItemKind::Product => &PRODUCT_COLUMNS,
        ItemKind::Task => &TASK_COLUMNS,
    };

    fields
        .iter()
        .map(|(field, default_visible)| ColumnCatalogEntry::new(kind.key(field), *default_visible))
        .collect()
}
