//! Batch processing: files in, records appended to a store.
//!
//! Files are handled strictly one after another. A file that cannot be read
//! as text still yields a record with empty fields; only unsupported or
//! unreadable files are skipped.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{InvexError, Result};
use crate::invoice::{ExtractionReport, FieldExtractor};
use crate::models::config::InvexConfig;
use crate::ocr::OcrBackend;
use crate::source::{ExtractedText, SourceDocument, SourceKind, TextSource};
use crate::store::RecordStore;

/// Non-fatal problem with one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchWarning {
    /// Extension is not pdf, jpg, jpeg or png. No record was created.
    UnsupportedFile { file: String },
    /// Text could not be extracted. The record was stored with empty fields.
    ExtractionFailed { file: String, reason: String },
    /// The file could not be read from disk. No record was created.
    ReadFailed { file: String, reason: String },
}

impl BatchWarning {
    pub fn file(&self) -> &str {
        match self {
            BatchWarning::UnsupportedFile { file }
            | BatchWarning::ExtractionFailed { file, .. }
            | BatchWarning::ReadFailed { file, .. } => file,
        }
    }
}

impl fmt::Display for BatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchWarning::UnsupportedFile { file } => {
                write!(f, "{}: unsupported file type, skipped", file)
            }
            BatchWarning::ExtractionFailed { file, reason } => {
                write!(f, "{}: text extraction failed: {}", file, reason)
            }
            BatchWarning::ReadFailed { file, reason } => {
                write!(f, "{}: could not read file: {}", file, reason)
            }
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Files turned into records.
    pub processed: usize,
    /// Files skipped without a record.
    pub skipped: usize,
    pub warnings: Vec<BatchWarning>,
}

impl BatchReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub report: ExtractionReport,
    /// Set when text extraction failed and the record is empty.
    pub warning: Option<BatchWarning>,
}

/// Text source and field extractor wired together.
pub struct InvoicePipeline<O> {
    source: TextSource<O>,
    extractor: FieldExtractor,
}

impl<O: OcrBackend> InvoicePipeline<O> {
    /// Build a pipeline around an OCR backend.
    pub fn new(ocr: O, config: &InvexConfig) -> Self {
        Self {
            source: TextSource::new(ocr, config.pdf.clone()),
            extractor: FieldExtractor::with_config(config.extraction.clone()),
        }
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Raw text of a document. Never fails.
    pub fn extract_text(&self, document: &SourceDocument) -> ExtractedText {
        self.source.extract_text(document)
    }

    /// Extract text and fields from an in-memory document.
    pub fn process_document(&self, document: &SourceDocument) -> ProcessedFile {
        let extracted = self.source.extract_text(document);
        let report = self
            .extractor
            .extract_with_report(&extracted.text, document.name());

        info!(
            "Processed {} ({} chars, {} empty fields)",
            document.name(),
            extracted.text.len(),
            report.empty_fields.len()
        );

        ProcessedFile {
            report,
            warning: extracted.warning.map(|reason| BatchWarning::ExtractionFailed {
                file: document.name().to_string(),
                reason,
            }),
        }
    }

    /// Read and process one file from disk.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedFile> {
        let document = SourceDocument::from_path(path)?;
        Ok(self.process_document(&document))
    }

    /// Process `paths` in order, appending one record per supported file.
    pub fn process_batch<P: AsRef<Path>>(&self, paths: &[P], store: &mut RecordStore) -> BatchReport {
        self.process_batch_with_progress(paths, store, |_, _, _| {})
    }

    /// Like [`process_batch`](Self::process_batch), calling `progress(index, total, name)`
    /// before each file.
    pub fn process_batch_with_progress<P, F>(
        &self,
        paths: &[P],
        store: &mut RecordStore,
        mut progress: F,
    ) -> BatchReport
    where
        P: AsRef<Path>,
        F: FnMut(usize, usize, &str),
    {
        let total = paths.len();
        let mut report = BatchReport::default();

        for (index, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            let name = display_name(path);
            progress(index, total, &name);

            if SourceKind::from_filename(&name).is_none() {
                warn!("Skipping {}: unsupported file type", name);
                report.skipped += 1;
                report.warnings.push(BatchWarning::UnsupportedFile { file: name });
                continue;
            }

            let document = match SourceDocument::from_path(path) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    report.skipped += 1;
                    report.warnings.push(read_warning(name, e));
                    continue;
                }
            };

            let processed = self.process_document(&document);
            store.append(processed.report.record);
            report.processed += 1;
            report.warnings.extend(processed.warning);
        }

        info!(
            "Batch finished: {} processed, {} skipped, {} warnings",
            report.processed,
            report.skipped,
            report.warnings.len()
        );
        report
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_warning(file: String, error: InvexError) -> BatchWarning {
    match error {
        InvexError::UnsupportedFile(_) => BatchWarning::UnsupportedFile { file },
        other => BatchWarning::ReadFailed {
            file,
            reason: other.to_string(),
        },
    }
}
