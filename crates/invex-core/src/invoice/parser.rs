//! Field extractor driving the per-field rule lists.

use std::time::Instant;

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, InvoiceRecord};

use super::rules::{default_rule_set, FieldMatch, FieldRules};

lazy_static! {
    static ref DEFAULT_EXTRACTOR: FieldExtractor = FieldExtractor::new();
}

/// Record plus details on how each field was resolved.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Extracted record.
    pub record: InvoiceRecord,
    /// One entry per field that a rule or fallback resolved.
    pub matches: Vec<FieldMatch>,
    /// Extracted fields left empty.
    pub empty_fields: Vec<Field>,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

/// Rule-based extractor turning raw document text into an [`InvoiceRecord`].
///
/// Extraction is pure: the same text and file name always give the same record.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<FieldRules>,
    config: ExtractionConfig,
}

impl FieldExtractor {
    /// Create an extractor with the built-in rules and default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with the built-in rules.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            rules: default_rule_set(),
            config,
        }
    }

    /// Replace the rule set.
    pub fn with_rules(mut self, rules: Vec<FieldRules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract all fields from `text`. Unmatched fields stay empty.
    pub fn extract_fields(&self, text: &str, filename: &str) -> InvoiceRecord {
        self.extract_with_report(text, filename).record
    }

    /// Extract all fields and report which rule resolved each one.
    pub fn extract_with_report(&self, text: &str, filename: &str) -> ExtractionReport {
        let start = Instant::now();
        let mut record = InvoiceRecord::new(filename);
        let mut matches = Vec::with_capacity(self.rules.len());

        for field_rules in &self.rules {
            match field_rules.apply(text, &self.config) {
                Some(hit) => {
                    trace!("{}: {:?} via {:?}", hit.field, hit.value, hit.source);
                    if let Some(slot) = record.get_mut(hit.field) {
                        *slot = hit.value.clone();
                    }
                    matches.push(hit);
                }
                None => trace!("{}: no match", field_rules.field),
            }
        }

        let empty_fields = record.empty_fields();
        if !empty_fields.is_empty() {
            let names: Vec<&str> = empty_fields.iter().map(|f| f.label()).collect();
            debug!("{}: empty fields: {}", filename, names.join(", "));
        }

        ExtractionReport {
            record,
            matches,
            empty_fields,
            processing_time_us: start.elapsed().as_micros() as u64,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract fields with the built-in rules and default settings.
pub fn extract_fields(text: &str, filename: &str) -> InvoiceRecord {
    DEFAULT_EXTRACTOR.extract_fields(text, filename)
}
