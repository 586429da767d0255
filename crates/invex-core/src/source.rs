//! Text source adapter: turns an input file into raw text.
//!
//! PDFs go through the embedded text layer, images through OCR. No OCR
//! fallback is attempted for PDFs without text.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{InvexError, Result};
use crate::models::config::PdfConfig;
use crate::ocr::{ImagePreprocessor, OcrBackend};
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Image,
}

impl SourceKind {
    /// Classify `name` by extension (`pdf`, `jpg`, `jpeg`, `png`), ignoring case.
    pub fn from_filename(name: &str) -> Option<Self> {
        let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "jpg" | "jpeg" | "png" => Some(SourceKind::Image),
            _ => None,
        }
    }
}

/// An input file held in memory.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    name: String,
    kind: SourceKind,
    data: Vec<u8>,
}

impl SourceDocument {
    /// Wrap file contents. The name must be non-empty and carry a supported extension.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvexError::MissingFileName);
        }
        let kind = SourceKind::from_filename(&name)
            .ok_or_else(|| InvexError::UnsupportedFile(name.clone()))?;
        Ok(Self { name, kind, data })
    }

    /// Read a file from disk, named after its final path component.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Check the extension before reading anything.
        if !name.is_empty() && SourceKind::from_filename(&name).is_none() {
            return Err(InvexError::UnsupportedFile(name));
        }
        let data = std::fs::read(path)?;
        Self::new(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Text pulled from a document. A failed extraction yields empty text and a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub warning: Option<String>,
}

/// Routes documents to PDF text extraction or image OCR.
pub struct TextSource<O> {
    ocr: O,
    preprocessor: ImagePreprocessor,
    pdf_config: PdfConfig,
}

impl<O: OcrBackend> TextSource<O> {
    pub fn new(ocr: O, pdf_config: PdfConfig) -> Self {
        Self {
            ocr,
            preprocessor: ImagePreprocessor::new(),
            pdf_config,
        }
    }

    pub fn ocr(&self) -> &O {
        &self.ocr
    }

    /// Extract text, never failing. Errors become a warning and empty text.
    pub fn extract_text(&self, document: &SourceDocument) -> ExtractedText {
        match self.try_extract_text(document) {
            Ok(text) => ExtractedText {
                text,
                warning: None,
            },
            Err(e) => {
                warn!("Text extraction failed for {}: {}", document.name(), e);
                ExtractedText {
                    text: String::new(),
                    warning: Some(e.to_string()),
                }
            }
        }
    }

    /// Extract text, reporting the first error.
    pub fn try_extract_text(&self, document: &SourceDocument) -> Result<String> {
        match document.kind() {
            SourceKind::Pdf => self.pdf_text(document.data()),
            SourceKind::Image => self.image_text(document.data()),
        }
    }

    fn pdf_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::with_config(&self.pdf_config);
        extractor.load(data)?;
        let text = extractor.extract_text()?;
        debug!("PDF text: {} pages, {} chars", extractor.page_count(), text.len());
        Ok(text)
    }

    fn image_text(&self, data: &[u8]) -> Result<String> {
        let image = image::load_from_memory(data)?;
        let prepared = self.preprocessor.prepare(&image)?;
        let text = self.ocr.recognize(&prepared)?;
        debug!("{} text: {} chars", self.ocr.name(), text.len());
        Ok(text)
    }
}
