//! Invoice and due date rules.
//!
//! Dates are kept exactly as matched. No calendar validation or reformatting
//! happens here, so "13/45/99" is a valid result.

use super::patterns::{DATE, DATE_ISSUED, DUE_DATE, INVOICE_DATE, ISSUED_DATE, PAYMENT_DUE};
use super::{FieldRules, Rule};
use crate::models::record::Field;

/// "Invoice Date", "Date", "Date Issued", "Issued Date".
pub fn invoice_date_rules() -> FieldRules {
    FieldRules::new(
        Field::InvoiceDate,
        vec![
            Rule::trimmed(&INVOICE_DATE),
            Rule::trimmed(&DATE),
            Rule::trimmed(&DATE_ISSUED),
            Rule::trimmed(&ISSUED_DATE),
        ],
    )
}

/// "Due Date", "Payment Due".
pub fn due_date_rules() -> FieldRules {
    FieldRules::new(
        Field::DueDate,
        vec![Rule::trimmed(&DUE_DATE), Rule::trimmed(&PAYMENT_DUE)],
    )
}
