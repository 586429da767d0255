//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_fields, ExtractionReport, FieldExtractor};
pub use rules::{FieldMatch, FieldRules, MatchSource, PostProcess, Rule};
