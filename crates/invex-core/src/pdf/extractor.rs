//! PDF text extraction using lopdf and pdf-extract.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
///
/// Per-page text comes from `pdf-extract`. When it cannot handle the document,
/// lopdf's own per-page extraction is used instead.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_empty_password: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_empty_password: config.decrypt_empty_password,
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// lopdf per-page extraction; a failing page yields an empty string.
    fn lopdf_page_texts(&self, doc: &Document) -> Vec<String> {
        doc.get_pages()
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    trace!("No text on page {}: {}", page_num, e);
                    String::new()
                }
            })
            .collect()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the raw bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        let doc = self.document()?;

        let raw_data = &self.raw_data;
        match guarded_pages(|| pdf_extract::extract_text_from_mem_by_pages(raw_data)) {
            Some(pages) => {
                debug!("Extracted text from {} pages", pages.len());
                Ok(pages)
            }
            None => Ok(self.lopdf_page_texts(doc)),
        }
    }
}

/// Run a per-page extractor; an error or a panic yields `None`.
///
/// pdf-extract panics on some malformed font dictionaries.
fn guarded_pages<F, E>(extract: F) -> Option<Vec<String>>
where
    F: FnOnce() -> std::result::Result<Vec<String>, E>,
    E: fmt::Display,
{
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(Ok(pages)) => Some(pages),
        Ok(Err(e)) => {
            warn!("pdf-extract failed ({}), falling back to lopdf", e);
            None
        }
        Err(_) => {
            warn!("pdf-extract panicked, falling back to lopdf");
            None
        }
    }
}
