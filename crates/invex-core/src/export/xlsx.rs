//! XLSX output via rust_xlsxwriter.

use rust_xlsxwriter::Workbook;

use crate::error::ExportError;
use crate::models::record::{Field, InvoiceRecord};

/// Single-sheet workbook: header row, then one row per record.
pub(super) fn write_workbook(
    records: &[InvoiceRecord],
    sheet_name: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, label) in Field::labels().iter().enumerate() {
        worksheet.write_string(0, col as u16, *label)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, value) in record.values().iter().enumerate() {
            // Empty values stay blank cells.
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
