//! In-memory table of extracted records.

use tracing::debug;

use crate::error::StoreError;
use crate::models::record::{Field, InvoiceRecord};

/// Ordered collection of records, in processing order.
///
/// Several records may share a source file name.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<InvoiceRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end.
    pub fn append(&mut self, record: InvoiceRecord) {
        debug!("Storing record #{} from {}", self.records.len(), record.source_file());
        self.records.push(record);
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        debug!("Clearing {} records", self.records.len());
        self.records.clear();
    }

    pub fn get(&self, row: usize) -> Option<&InvoiceRecord> {
        self.records.get(row)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvoiceRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[InvoiceRecord] {
        &self.records
    }

    /// Overwrite one field of the record at `row`.
    ///
    /// The source file column is read-only.
    pub fn edit(&mut self, row: usize, field: Field, value: impl Into<String>) -> Result<(), StoreError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(StoreError::RowOutOfRange { row, len })?;
        let slot = record.get_mut(field).ok_or(StoreError::ReadOnlyField(field))?;
        *slot = value.into();
        debug!("Edited row {} field {}", row, field);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a InvoiceRecord;
    type IntoIter = std::slice::Iter<'a, InvoiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Extend<InvoiceRecord> for RecordStore {
    fn extend<T: IntoIterator<Item = InvoiceRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}
