//! Flat tabular records read from the bundled CSV word lists.
//!
//! Files are read with the `csv` crate: the first row is a header and is discarded,
//! fields are trimmed, quotes are not special, and rows may vary in length. Rows with
//! too few fields are skipped rather than reported.

use csv::{ReaderBuilder, StringRecord, Trim};

/// Minimum fields for a phrase row: `level, glyph, phrase, meaning`
pub const PHRASE_MIN_FIELDS: usize = 4;

/// Minimum fields for a vocabulary row. The full shape has six columns
/// (`category, group, sub_group, glyph, meaning, pronunciation`); legacy five-column
/// rows without pronunciation are accepted and get an empty pronunciation.
pub const VOCABULARY_MIN_FIELDS: usize = 5;

/// A row of the phrase list (single level of grouping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRecord {
    pub level: String,
    pub glyph: String,
    pub phrase: String,
    pub meaning: String,
}

impl PhraseRecord {
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < PHRASE_MIN_FIELDS {
            return None;
        }
        Some(Self {
            level: record[0].to_string(),
            glyph: record[1].to_string(),
            phrase: record[2].to_string(),
            meaning: record[3].to_string(),
        })
    }
}

/// A row of the vocabulary list (category, group and optional sub-group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRecord {
    pub category: String,
    pub group: String,
    /// Empty when the group holds its cards directly
    pub sub_group: String,
    pub glyph: String,
    pub meaning: String,
    pub pronunciation: String,
}

impl VocabularyRecord {
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < VOCABULARY_MIN_FIELDS {
            return None;
        }
        Some(Self {
            category: record[0].to_string(),
            group: record[1].to_string(),
            sub_group: record[2].to_string(),
            glyph: record[3].to_string(),
            meaning: record[4].to_string(),
            pronunciation: record.get(5).unwrap_or_default().to_string(),
        })
    }
}

pub fn parse_phrases(content: &str) -> Vec<PhraseRecord> {
    parse_rows(content, PhraseRecord::from_record, "phrase")
}

pub fn parse_vocabulary(content: &str) -> Vec<VocabularyRecord> {
    parse_rows(content, VocabularyRecord::from_record, "vocabulary")
}

fn parse_rows<T>(content: &str, parse: fn(&StringRecord) -> Option<T>, kind: &str) -> Vec<T> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut skipped = 0;
    let mut records = Vec::new();
    for result in reader.records() {
        match result.ok().as_ref().and_then(parse) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} short {} rows", skipped, kind);
    }
    records
}
