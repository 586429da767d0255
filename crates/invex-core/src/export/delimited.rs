//! CSV output.

use crate::error::ExportError;
use crate::models::record::{Field, InvoiceRecord};

pub(super) fn write_csv(records: &[InvoiceRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Field::labels())?;
    for record in records {
        writer.write_record(record.values())?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::CsvBuffer(e.to_string()))
}
