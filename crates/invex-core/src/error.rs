//! Error types for the invex-core library.

use thiserror::Error;

use crate::models::record::Field;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input document was given without a file name.
    #[error("input file name is empty")]
    MissingFileName,

    /// The input file type is not handled.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be started.
    #[error("failed to launch OCR engine: {0}")]
    Launch(String),

    /// The OCR engine ran but reported a failure.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image preprocessing failed.
    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised by the record store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Row index past the end of the store.
    #[error("row {row} out of range (store has {len} records)")]
    RowOutOfRange { row: usize, len: usize },

    /// The field cannot be changed after creation.
    #[error("field '{0}' is read-only")]
    ReadOnlyField(Field),
}

/// Errors raised while writing a spreadsheet.
#[derive(Error, Debug)]
pub enum ExportError {
    /// XLSX workbook error.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer error.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// CSV buffer could not be flushed.
    #[error("csv buffer: {0}")]
    CsvBuffer(String),

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
