//! Spreadsheet export of invoice records.
//!
//! One header row with the field labels, then one row per record in store
//! order. Values are written as plain text.

mod delimited;
mod xlsx;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::models::record::InvoiceRecord;

/// Default worksheet name.
pub const DEFAULT_SHEET_NAME: &str = "Invoices";

/// Default prefix of generated file names.
pub const DEFAULT_FILENAME_PREFIX: &str = "invoice_data";

/// Spreadsheet output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    /// Format implied by the file name's extension, ignoring case.
    pub fn from_filename(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// Append `.xlsx` unless the name already ends in a recognized extension.
pub fn normalize_filename(name: &str) -> String {
    normalize_filename_with(name, ExportFormat::Xlsx)
}

/// Append `fallback`'s extension unless the name already ends in a recognized one.
pub fn normalize_filename_with(name: &str, fallback: ExportFormat) -> String {
    match ExportFormat::from_filename(name) {
        Some(_) => name.to_string(),
        None => format!("{}.{}", name, fallback.extension()),
    }
}

/// `invoice_data_YYYYMMDD_HHMMSS.xlsx` for the given moment.
pub fn default_filename(now: NaiveDateTime) -> String {
    default_filename_with(DEFAULT_FILENAME_PREFIX, ExportFormat::Xlsx, now)
}

pub fn default_filename_with(prefix: &str, format: ExportFormat, now: NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, now.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Serialize `records` to the format implied by `filename` (XLSX by default).
pub fn export(records: &[InvoiceRecord], filename: &str) -> Result<Vec<u8>, ExportError> {
    let format = ExportFormat::from_filename(filename).unwrap_or_default();
    export_as(records, format, DEFAULT_SHEET_NAME)
}

/// Serialize `records` in an explicit format.
pub fn export_as(
    records: &[InvoiceRecord],
    format: ExportFormat,
    sheet_name: &str,
) -> Result<Vec<u8>, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => xlsx::write_workbook(records, sheet_name)?,
        ExportFormat::Csv => delimited::write_csv(records)?,
    };
    info!("Exported {} records as {} ({} bytes)", records.len(), format, bytes.len());
    Ok(bytes)
}

/// Write exported bytes to disk.
pub fn write_to_path(bytes: &[u8], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}
