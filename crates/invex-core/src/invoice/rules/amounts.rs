//! Total and tax amount rules.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_DUE, BALANCE_DUE, GRAND_TOTAL, GST, SALES_TAX, TAX, TOTAL, VAT};
use super::{FieldRules, Rule};
use crate::models::record::Field;

/// "Total", "Amount Due", "Grand Total", "Balance Due".
pub fn total_amount_rules() -> FieldRules {
    FieldRules::new(
        Field::TotalAmount,
        vec![
            Rule::trimmed(&TOTAL),
            Rule::trimmed(&AMOUNT_DUE),
            Rule::trimmed(&GRAND_TOTAL),
            Rule::trimmed(&BALANCE_DUE),
        ],
    )
}

/// "Tax", "VAT", "GST", "Sales Tax".
pub fn tax_amount_rules() -> FieldRules {
    FieldRules::new(
        Field::TaxAmount,
        vec![
            Rule::trimmed(&TAX),
            Rule::trimmed(&VAT),
            Rule::trimmed(&GST),
            Rule::trimmed(&SALES_TAX),
        ],
    )
}

/// Parse an extracted amount such as "1,234.56".
///
/// Commas are thousands separators; the dot is the decimal point. Returns `None`
/// for anything else, including the empty string.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;

    fn total(text: &str) -> String {
        total_amount_rules()
            .apply(text, &ExtractionConfig::default())
            .map(|m| m.value)
            .unwrap_or_default()
    }

    fn tax(text: &str) -> String {
        tax_amount_rules()
            .apply(text, &ExtractionConfig::default())
            .map(|m| m.value)
            .unwrap_or_default()
    }

    #[test]
    fn test_total_strips_symbol() {
        assert_eq!(total("Total: $1,234.56"), "1,234.56");
        assert_eq!(total("TOTAL AMOUNT € 99.00"), "99.00");
        assert_eq!(total("Amount Due: £12.50"), "12.50");
        assert_eq!(total("Balance Due 7,000.10"), "7,000.10");
    }

    #[test]
    fn test_total_requires_two_decimals() {
        assert_eq!(total("Total: $1234"), "");
        assert_eq!(total("Total: 12.5"), "");
    }

    #[test]
    fn test_first_total_occurrence_wins() {
        let text = "Subtotal: $100.00\nTax (8%): $8.00\nTotal: $108.00\nAmount Due: $50.00";
        assert_eq!(total(text), "100.00");
        assert_eq!(total("Total: $108.00\nSubtotal: $100.00"), "108.00");
    }

    #[test]
    fn test_tax_labels() {
        assert_eq!(tax("Tax: $8.00"), "8.00");
        assert_eq!(tax("VAT 23.00"), "23.00");
        assert_eq!(tax("GST: 5.25"), "5.25");
        assert_eq!(tax("Sales Tax: $1.10"), "1.10");
    }

    #[test]
    fn test_tax_with_rate_in_parentheses_misses() {
        assert_eq!(tax("Tax (8%): $8.00"), "");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("99.00"), Some(Decimal::new(9900, 2)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12 EUR"), None);
    }
}
