//! Currency detection.

use super::patterns::{CURRENCY_CODE, CURRENCY_SYMBOL};
use super::{FieldRules, PostProcess, Rule};
use crate::models::record::Field;

/// Explicit "Currency: XXX" label, then the first currency symbol in the text.
pub fn currency_rules() -> FieldRules {
    FieldRules::new(
        Field::Currency,
        vec![
            Rule::trimmed(&CURRENCY_CODE),
            Rule::new(&CURRENCY_SYMBOL, PostProcess::CurrencySymbol),
        ],
    )
}

/// ISO 4217 code for a currency symbol.
pub fn symbol_to_code(symbol: &str) -> Option<&'static str> {
    match symbol {
        "$" => Some("USD"),
        "€" => Some("EUR"),
        "£" => Some("GBP"),
        "¥" => Some("JPY"),
        _ => None,
    }
}
