//! Regex patterns for invoice field extraction.
//!
//! Every list is ordered: the extractor tries them front to back and keeps the
//! first hit. Capture group 1 holds the value unless noted otherwise.

use lazy_static::lazy_static;
use regex::Regex;

/// Separator allowed between a label and its value.
macro_rules! label_gap {
    () => {
        r"[:.\s]*"
    };
}

/// `D{1,2} sep D{1,2} sep D{2,4}` with sep one of `/ - .`.
macro_rules! date_value {
    () => {
        r"([0-9]{1,2}[/\-.][0-9]{1,2}[/\-.][0-9]{2,4})"
    };
}

/// Optional currency symbol followed by an amount with two decimals.
macro_rules! amount_value {
    () => {
        r"[$€£¥]?\s*([0-9,]+\.[0-9]{2})"
    };
}

/// Remainder of a vendor line; a newline must follow.
macro_rules! vendor_value {
    () => {
        r"([A-Za-z0-9 \t.,&'\-]+)\r?\n"
    };
}

lazy_static! {
    // Invoice number
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(concat!(
        r"(?i)Invoice\s*(?:#|No|Number|Num)", label_gap!(), r"([A-Z0-9\-_]+)"
    )).unwrap();

    pub static ref INVOICE_NUMBER_ID: Regex = Regex::new(concat!(
        r"(?i)Invoice\s*ID", label_gap!(), r"([A-Z0-9\-_]+)"
    )).unwrap();

    pub static ref INVOICE_NUMBER_BARE: Regex = Regex::new(concat!(
        r"(?i)Invoice", label_gap!(), r"([A-Z0-9\-_]+)"
    )).unwrap();

    // Invoice date
    pub static ref INVOICE_DATE: Regex = Regex::new(concat!(
        r"(?i)Invoice\s*Date", label_gap!(), date_value!()
    )).unwrap();

    pub static ref DATE: Regex = Regex::new(concat!(
        r"(?i)Date", label_gap!(), date_value!()
    )).unwrap();

    pub static ref DATE_ISSUED: Regex = Regex::new(concat!(
        r"(?i)Date\s*Issued", label_gap!(), date_value!()
    )).unwrap();

    pub static ref ISSUED_DATE: Regex = Regex::new(concat!(
        r"(?i)Issued\s*Date", label_gap!(), date_value!()
    )).unwrap();

    // Due date
    pub static ref DUE_DATE: Regex = Regex::new(concat!(
        r"(?i)Due\s*Date", label_gap!(), date_value!()
    )).unwrap();

    pub static ref PAYMENT_DUE: Regex = Regex::new(concat!(
        r"(?i)Payment\s*Due", label_gap!(), date_value!()
    )).unwrap();

    // Vendor name
    pub static ref VENDOR_NAME: Regex = Regex::new(concat!(
        r"(?i)Vendor\s*Name", label_gap!(), vendor_value!()
    )).unwrap();

    pub static ref SUPPLIER: Regex = Regex::new(concat!(
        r"(?i)Supplier", label_gap!(), vendor_value!()
    )).unwrap();

    pub static ref FROM: Regex = Regex::new(concat!(
        r"(?i)From", label_gap!(), vendor_value!()
    )).unwrap();

    pub static ref SELLER: Regex = Regex::new(concat!(
        r"(?i)Seller", label_gap!(), vendor_value!()
    )).unwrap();

    // Total amount. Unanchored, so "Subtotal" answers first when it comes first.
    pub static ref TOTAL: Regex = Regex::new(concat!(
        r"(?i)Total(?:\s*Amount)?", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref AMOUNT_DUE: Regex = Regex::new(concat!(
        r"(?i)Amount\s*Due", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref GRAND_TOTAL: Regex = Regex::new(concat!(
        r"(?i)Grand\s*Total", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref BALANCE_DUE: Regex = Regex::new(concat!(
        r"(?i)Balance\s*Due", label_gap!(), amount_value!()
    )).unwrap();

    // Tax amount
    pub static ref TAX: Regex = Regex::new(concat!(
        r"(?i)Tax(?:\s*Amount)?", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref VAT: Regex = Regex::new(concat!(
        r"(?i)VAT", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref GST: Regex = Regex::new(concat!(
        r"(?i)GST", label_gap!(), amount_value!()
    )).unwrap();

    pub static ref SALES_TAX: Regex = Regex::new(concat!(
        r"(?i)Sales\s*Tax", label_gap!(), amount_value!()
    )).unwrap();

    // Currency code, stored as written.
    pub static ref CURRENCY_CODE: Regex = Regex::new(concat!(
        r"(?i)Currency", label_gap!(), r"([A-Z]{3})"
    )).unwrap();

    /// Group 0 is the symbol.
    pub static ref CURRENCY_SYMBOL: Regex = Regex::new(r"[$€£¥]").unwrap();

    // Line items block, up to the next total/balance/due keyword.
    pub static ref ITEMS_ITEM_DESCRIPTION: Regex = Regex::new(
        r"(?is)Item\s*Description(.*?)(?:Total|Balance|Due)"
    ).unwrap();

    pub static ref ITEMS_DESCRIPTION_QUANTITY_RATE: Regex = Regex::new(
        r"(?is)Description\s*Quantity\s*Rate(.*?)(?:Total|Balance|Due)"
    ).unwrap();

    pub static ref ITEMS_PRODUCT_DESCRIPTION: Regex = Regex::new(
        r"(?is)Product\s*Description(.*?)(?:Total|Balance|Due)"
    ).unwrap();
}

/// Words that disqualify a header line from being taken as the vendor name.
pub const NON_VENDOR_WORDS: [&str; 4] = ["invoice", "bill", "receipt", "statement"];
