//! Vendor name rules and the header-line fallback.

use super::patterns::{FROM, NON_VENDOR_WORDS, SELLER, SUPPLIER, VENDOR_NAME};
use super::{FieldRules, Rule};
use crate::models::config::ExtractionConfig;
use crate::models::record::Field;

/// "Vendor Name", "Supplier", "From", "Seller"; falls back to the document header.
pub fn vendor_name_rules() -> FieldRules {
    FieldRules::new(
        Field::VendorName,
        vec![
            Rule::trimmed(&VENDOR_NAME),
            Rule::trimmed(&SUPPLIER),
            Rule::trimmed(&FROM),
            Rule::trimmed(&SELLER),
        ],
    )
    .with_fallback(vendor_from_header)
}

/// First non-blank line among the leading lines that does not look like a
/// document title ("invoice", "bill", "receipt", "statement").
pub fn vendor_from_header(text: &str, config: &ExtractionConfig) -> Option<String> {
    text.split('\n')
        .take(config.vendor_scan_lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| {
            let lower = line.to_lowercase();
            !NON_VENDOR_WORDS.iter().any(|word| lower.contains(word))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(text: &str) -> String {
        vendor_name_rules()
            .apply(text, &ExtractionConfig::default())
            .map(|m| m.value)
            .unwrap_or_default()
    }

    #[test]
    fn test_labeled_vendor() {
        assert_eq!(vendor("Vendor Name: Acme Supplies, Inc.\nTotal: 1.00"), "Acme Supplies, Inc.");
        assert_eq!(vendor("Supplier: O'Brien & Co\n"), "O'Brien & Co");
        assert_eq!(vendor("Seller. North-West Ltd.\n"), "North-West Ltd.");
    }

    #[test]
    fn test_value_on_following_line() {
        assert_eq!(vendor("From:\nGlobal Services Corp.\n"), "Global Services Corp.");
    }

    #[test]
    fn test_header_fallback() {
        let text = "INVOICE\nAcme Corp.\n123 Business St.\nInvoice #: 1\n";
        assert_eq!(vendor(text), "Acme Corp.");
    }

    #[test]
    fn test_header_fallback_skips_title_words() {
        let text = "Statement of account\nBilling dept\n\nTechSupplies Inc.\n";
        assert_eq!(vendor(text), "TechSupplies Inc.");
    }

    #[test]
    fn test_header_fallback_only_scans_five_lines() {
        let text = "Invoice\nreceipt\nbill\nstatement\nINVOICE COPY\nLate Vendor\n";
        assert_eq!(vendor(text), "");
    }

    #[test]
    fn test_unlabeled_last_line_without_newline() {
        // Labeled rules need a trailing newline; the fallback still finds it.
        assert_eq!(vendor("Seller: Acme"), "Seller: Acme");
    }
}
