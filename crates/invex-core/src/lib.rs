//! Core library for invoice field extraction.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract with a lopdf fallback)
//! - Image OCR through Tesseract after Otsu binarization
//! - Rule-based extraction of nine invoice fields
//! - An in-memory record store with field editing
//! - XLSX and CSV export

pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod source;
pub mod store;

pub use error::{ExportError, InvexError, OcrError, PdfError, Result, StoreError};
pub use export::{default_filename, export, export_as, normalize_filename, write_to_path, ExportFormat};
pub use invoice::{extract_fields, ExtractionReport, FieldExtractor};
pub use models::config::InvexConfig;
pub use models::{Field, InvoiceRecord, UnknownField};
pub use ocr::{OcrBackend, TesseractEngine};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{BatchReport, BatchWarning, InvoicePipeline, ProcessedFile};
pub use source::{ExtractedText, SourceDocument, SourceKind, TextSource};
pub use store::RecordStore;
