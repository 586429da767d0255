//! Line-items block capture.

use super::patterns::{
    ITEMS_DESCRIPTION_QUANTITY_RATE, ITEMS_ITEM_DESCRIPTION, ITEMS_PRODUCT_DESCRIPTION,
};
use super::{FieldRules, PostProcess, Rule};
use crate::models::record::Field;

/// Block after an items header, cut at the next "Total"/"Balance"/"Due".
pub fn invoice_items_rules() -> FieldRules {
    FieldRules::new(
        Field::InvoiceItems,
        vec![
            Rule::new(&ITEMS_ITEM_DESCRIPTION, PostProcess::FirstLines),
            Rule::new(&ITEMS_DESCRIPTION_QUANTITY_RATE, PostProcess::FirstLines),
            Rule::new(&ITEMS_PRODUCT_DESCRIPTION, PostProcess::FirstLines),
        ],
    )
}

/// Keep at most `limit` non-blank lines, each trimmed, joined with `\n`.
pub fn first_non_empty_lines(block: &str, limit: usize) -> String {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect::<Vec<_>>()
        .join("\n")
}
