//! Rule-based field extractors.
//!
//! Each field owns an ordered list of `(pattern, post-processing)` rules and an
//! optional fallback heuristic. [`FieldRules::apply`] runs the list: the first
//! pattern that matches decides the value and later rules are never tried.

pub mod amounts;
pub mod currency;
pub mod dates;
pub mod items;
pub mod numbers;
pub mod patterns;
pub mod vendor;

pub use amounts::{parse_amount, tax_amount_rules, total_amount_rules};
pub use currency::{currency_rules, symbol_to_code};
pub use dates::{due_date_rules, invoice_date_rules};
pub use items::{invoice_items_rules, first_non_empty_lines};
pub use numbers::invoice_number_rules;
pub use vendor::{vendor_from_header, vendor_name_rules};

use regex::{Captures, Regex};

use crate::models::config::ExtractionConfig;
use crate::models::record::Field;

/// Heuristic run when no pattern produced a value.
pub type Fallback = fn(&str, &ExtractionConfig) -> Option<String>;

/// How a successful match is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Capture group 1, trimmed.
    Trim,
    /// Whole match is a currency symbol, mapped to its ISO code.
    CurrencySymbol,
    /// Capture group 1 reduced to its first non-empty lines.
    FirstLines,
}

impl PostProcess {
    fn apply(&self, caps: &Captures<'_>, config: &ExtractionConfig) -> String {
        match self {
            PostProcess::Trim => group(caps, 1).trim().to_string(),
            PostProcess::CurrencySymbol => symbol_to_code(group(caps, 0))
                .unwrap_or_default()
                .to_string(),
            PostProcess::FirstLines => {
                first_non_empty_lines(group(caps, 1), config.max_item_lines)
            }
        }
    }
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str()).unwrap_or("")
}

/// A single candidate pattern for a field.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: &'static Regex,
    pub post: PostProcess,
}

impl Rule {
    pub const fn new(pattern: &'static Regex, post: PostProcess) -> Self {
        Self { pattern, post }
    }

    pub const fn trimmed(pattern: &'static Regex) -> Self {
        Self::new(pattern, PostProcess::Trim)
    }
}

/// Where a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Index into the field's rule list.
    Rule(usize),
    /// The fallback heuristic.
    Fallback,
}

/// A resolved field value with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: Field,
    pub value: String,
    pub source: MatchSource,
    /// Byte span of the whole match in the source text (rules only).
    pub position: Option<(usize, usize)>,
}

/// Ordered extraction rules for one field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: Field,
    pub rules: Vec<Rule>,
    pub fallback: Option<Fallback>,
}

impl FieldRules {
    pub fn new(field: Field, rules: Vec<Rule>) -> Self {
        Self {
            field,
            rules,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Resolve the field against `text`.
    ///
    /// The fallback only runs when no rule matched or the winning rule produced
    /// an empty value.
    pub fn apply(&self, text: &str, config: &ExtractionConfig) -> Option<FieldMatch> {
        let hit = self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.pattern.captures(text).map(|caps| {
                let whole = caps.get(0).map(|m| (m.start(), m.end()));
                FieldMatch {
                    field: self.field,
                    value: rule.post.apply(&caps, config),
                    source: MatchSource::Rule(index),
                    position: whole,
                }
            })
        });

        match hit {
            Some(m) if !m.value.is_empty() => Some(m),
            hit => self
                .fallback
                .and_then(|fallback| fallback(text, config))
                .filter(|value| !value.is_empty())
                .map(|value| FieldMatch {
                    field: self.field,
                    value,
                    source: MatchSource::Fallback,
                    position: None,
                })
                .or(hit),
        }
    }
}

/// The full ordered rule set, one entry per extracted field.
pub fn default_rule_set() -> Vec<FieldRules> {
    vec![
        invoice_number_rules(),
        invoice_date_rules(),
        due_date_rules(),
        vendor_name_rules(),
        total_amount_rules(),
        tax_amount_rules(),
        currency_rules(),
        invoice_items_rules(),
    ]
}
