//! Metadata normalization
//!
//! Embedded document metadata (PDF/office properties) arrives as raw strings
//! from an external extraction collaborator. This module owns the mapping
//! from record field to extractor key and the per-field cleanup rules.
//! Cleanup never fails: a value that resists normalization passes through
//! unchanged as text.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Record fields the extractor can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    Title,
    MimeType,
    Author,
    DateCreated,
}

/// Outcome of normalizing one raw metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Timestamp(NaiveDateTime),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            MetadataValue::Timestamp(_) => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            MetadataValue::Timestamp(ts) => Some(*ts),
            MetadataValue::Text(_) => None,
        }
    }
}

/// Timestamp patterns tried in order for `DateCreated`, each with the
/// length of the string it expects to match. The raw value is truncated to
/// that length before parsing, so a longer string with a date-shaped prefix
/// still parses. Deliberately lenient; see DESIGN.md.
const DATE_PATTERNS: &[(&str, usize)] = &[("%Y-%m-%dT%H:%M:%SZ", 20), ("%Y%m%d%H%M%S", 14)];

/// Normalize one raw metadata value for the given field.
///
/// - `Title`: entirely-uppercase values are converted to title case,
///   anything else passes through.
/// - `DateCreated`: parsed against the known timestamp patterns; if none
///   match, the raw string survives as `Text`.
/// - Other fields pass through unchanged.
pub fn normalize(field: MetadataField, raw: &str) -> MetadataValue {
    match field {
        MetadataField::Title => MetadataValue::Text(normalize_title(raw)),
        MetadataField::DateCreated => normalize_date_created(raw),
        MetadataField::MimeType | MetadataField::Author => MetadataValue::Text(raw.to_string()),
    }
}

fn normalize_title(raw: &str) -> String {
    if is_all_uppercase(raw) {
        title_case(raw)
    } else {
        raw.to_string()
    }
}

/// True when the string has at least one cased character and every cased
/// character is uppercase.
fn is_all_uppercase(s: &str) -> bool {
    let mut saw_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            saw_cased = true;
        }
    }
    saw_cased
}

/// Capitalize the first letter of each word, lowercasing the rest. A word
/// starts after any non-alphabetic character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn normalize_date_created(raw: &str) -> MetadataValue {
    for (pattern, expected_len) in DATE_PATTERNS {
        let truncated: String = raw.chars().take(*expected_len).collect();
        if let Ok(ts) = NaiveDateTime::parse_from_str(&truncated, pattern) {
            return MetadataValue::Timestamp(ts);
        }
    }
    MetadataValue::Text(raw.to_string())
}

/// Mapping from record field to the key used by the metadata-extraction
/// collaborator. The defaults follow common PDF/office property names and
/// can be overridden per deployment.
#[derive(Debug, Clone)]
pub struct MetadataMapping {
    entries: Vec<(MetadataField, String)>,
}

impl Default for MetadataMapping {
    fn default() -> Self {
        Self {
            entries: vec![
                (MetadataField::Title, "title".to_string()),
                (MetadataField::MimeType, "mimetype".to_string()),
                (MetadataField::Author, "creator".to_string()),
                (MetadataField::DateCreated, "creation date".to_string()),
            ],
        }
    }
}

impl MetadataMapping {
    /// Override (or add) the source key for a field.
    pub fn with(mut self, field: MetadataField, source_key: impl Into<String>) -> Self {
        let source_key = source_key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = source_key;
        } else {
            self.entries.push((field, source_key));
        }
        self
    }

    pub fn source_key(&self, field: MetadataField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, k)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetadataField, &str)> {
        self.entries.iter().map(|(f, k)| (*f, k.as_str()))
    }
}
