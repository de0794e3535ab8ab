//! Word list content: records, the category tree, and cached sources.
//!
//! # Sources
//!
//! - `phrases.csv`: `level, glyph, phrase, meaning`. One category per level, each
//!   holding a single `All` group.
//! - `vocabulary.csv`: `category, group, sub_group, glyph, meaning, pronunciation`.
//!   Groups with an empty sub-group hold their cards directly.
//!
//! Both files are looked up in the data directory (see `paths`) and fall back to the
//! copies bundled at build time.

pub mod hierarchy;
pub mod library;
pub mod records;

pub use hierarchy::{build_phrases, build_vocabulary, Dataset, ALL_GROUP};
pub use library::{build_dataset, Library, LoadError, Source};
pub use records::{PhraseRecord, VocabularyRecord};
