//! Invoice number rules.

use super::patterns::{INVOICE_NUMBER_BARE, INVOICE_NUMBER_ID, INVOICE_NUMBER_LABELED};
use super::{FieldRules, Rule};
use crate::models::record::Field;

/// "Invoice #/No/Number/Num", then "Invoice ID", then a bare "Invoice".
pub fn invoice_number_rules() -> FieldRules {
    FieldRules::new(
        Field::InvoiceNumber,
        vec![
            Rule::trimmed(&INVOICE_NUMBER_LABELED),
            Rule::trimmed(&INVOICE_NUMBER_ID),
            Rule::trimmed(&INVOICE_NUMBER_BARE),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ExtractionConfig;

    fn number(text: &str) -> String {
        invoice_number_rules()
            .apply(text, &ExtractionConfig::default())
            .map(|m| m.value)
            .unwrap_or_default()
    }

    #[test]
    fn test_labeled_forms() {
        assert_eq!(number("Invoice Number: INV-2024-001"), "INV-2024-001");
        assert_eq!(number("Invoice #: INV-4821"), "INV-4821");
        assert_eq!(number("invoice no. A_77"), "A_77");
        assert_eq!(number("Invoice Num 12345"), "12345");
    }

    #[test]
    fn test_invoice_id() {
        assert_eq!(number("Invoice ID: X-9"), "X-9");
    }

    #[test]
    fn test_bare_invoice_label() {
        assert_eq!(number("Invoice: 2024-17"), "2024-17");
    }

    #[test]
    fn test_labeled_form_beats_earlier_bare_heading() {
        // The heading "INVOICE" comes first, but the labeled rule is tried first.
        assert_eq!(number("INVOICE\nInvoice #: INV-1000\n"), "INV-1000");
    }

    #[test]
    fn test_no_invoice_word() {
        assert_eq!(number("Receipt 42"), "");
    }
}
