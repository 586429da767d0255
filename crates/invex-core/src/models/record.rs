//! Fixed-shape invoice record produced by the field extractor.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::rules::amounts::parse_amount;

/// One of the nine record fields, in export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    VendorName,
    TotalAmount,
    TaxAmount,
    Currency,
    InvoiceItems,
    SourceFile,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 9] = [
        Field::InvoiceNumber,
        Field::InvoiceDate,
        Field::DueDate,
        Field::VendorName,
        Field::TotalAmount,
        Field::TaxAmount,
        Field::Currency,
        Field::InvoiceItems,
        Field::SourceFile,
    ];

    /// Column header used in exports and the review shell.
    pub fn label(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "Invoice Number",
            Field::InvoiceDate => "Invoice Date",
            Field::DueDate => "Due Date",
            Field::VendorName => "Vendor Name",
            Field::TotalAmount => "Total Amount",
            Field::TaxAmount => "Tax Amount",
            Field::Currency => "Currency",
            Field::InvoiceItems => "Invoice Items",
            Field::SourceFile => "Source File",
        }
    }

    /// Snake-case key, matching the JSON serialization.
    pub fn key(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoice_number",
            Field::InvoiceDate => "invoice_date",
            Field::DueDate => "due_date",
            Field::VendorName => "vendor_name",
            Field::TotalAmount => "total_amount",
            Field::TaxAmount => "tax_amount",
            Field::Currency => "currency",
            Field::InvoiceItems => "invoice_items",
            Field::SourceFile => "source_file",
        }
    }

    /// Whether the field may be changed after the record is created.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Field::SourceFile)
    }

    /// Column header labels in order.
    pub fn labels() -> [&'static str; 9] {
        Self::ALL.map(|f| f.label())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a field name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the label ("Due Date") or the key ("due_date"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Field::ALL
            .into_iter()
            .find(|f| f.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Structured fields extracted from one invoice document.
///
/// Every field is always present; an empty string means nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub vendor_name: String,
    pub total_amount: String,
    pub tax_amount: String,
    pub currency: String,
    /// Up to a few lines of the line-items block, newline-joined.
    pub invoice_items: String,
    source_file: String,
}

impl InvoiceRecord {
    /// Create a record with all extracted fields empty.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    /// Name of the file this record was extracted from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Read a field by name.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::InvoiceNumber => &self.invoice_number,
            Field::InvoiceDate => &self.invoice_date,
            Field::DueDate => &self.due_date,
            Field::VendorName => &self.vendor_name,
            Field::TotalAmount => &self.total_amount,
            Field::TaxAmount => &self.tax_amount,
            Field::Currency => &self.currency,
            Field::InvoiceItems => &self.invoice_items,
            Field::SourceFile => &self.source_file,
        }
    }

    /// Mutable access to an editable field. `None` for the source file.
    pub(crate) fn get_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::InvoiceNumber => Some(&mut self.invoice_number),
            Field::InvoiceDate => Some(&mut self.invoice_date),
            Field::DueDate => Some(&mut self.due_date),
            Field::VendorName => Some(&mut self.vendor_name),
            Field::TotalAmount => Some(&mut self.total_amount),
            Field::TaxAmount => Some(&mut self.tax_amount),
            Field::Currency => Some(&mut self.currency),
            Field::InvoiceItems => Some(&mut self.invoice_items),
            Field::SourceFile => None,
        }
    }

    /// Field values in column order.
    pub fn values(&self) -> [&str; 9] {
        Field::ALL.map(|f| self.get(f))
    }

    /// Fields that were left empty.
    pub fn empty_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    /// Total amount parsed as a decimal, if it looks like one.
    pub fn total_amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.total_amount)
    }

    /// Tax amount parsed as a decimal, if it looks like one.
    pub fn tax_amount_value(&self) -> Option<Decimal> {
        parse_amount(&self.tax_amount)
    }
}
