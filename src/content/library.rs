//! Cached access to the two word lists.
//!
//! Each source is read and built at most once per `Library`; later calls return the
//! cached tree. When a list is missing from the data directory, the copy bundled into
//! the binary is used instead.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::hierarchy::{build_phrases, build_vocabulary, Dataset};
use super::records::{parse_phrases, parse_vocabulary};

const BUNDLED_PHRASES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/phrases.csv"));
const BUNDLED_VOCABULARY: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/vocabulary.csv"));

/// Which word list a collection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Phrases,
    Vocabulary,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Phrases => "phrases",
            Source::Vocabulary => "vocabulary",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Source::Phrases => "phrases.csv",
            Source::Vocabulary => "vocabulary.csv",
        }
    }

    /// Menu key of this source's top-level section
    pub fn section_menu_key(&self) -> String {
        format!("{}_section", self.as_str())
    }

    fn bundled(&self) -> &'static str {
        match self {
            Source::Phrases => BUNDLED_PHRASES,
            Source::Vocabulary => BUNDLED_VOCABULARY,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phrases" => Ok(Source::Phrases),
            "vocabulary" => Ok(Source::Vocabulary),
            _ => Err(format!("Invalid source: {}", s)),
        }
    }
}

/// Word list loading errors.
#[derive(Debug)]
pub enum LoadError {
    FileNotFound(String),
    Io(String, String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "Word list not found: {}", path),
            LoadError::Io(path, err) => write!(f, "IO error reading {}: {}", path, err),
        }
    }
}

impl LoadError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::FileNotFound(_) => "Word list not found",
            LoadError::Io(_, _) => "Failed to read word list",
        }
    }
}

impl std::error::Error for LoadError {}

/// Read a word list file as text.
pub fn read_source_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound(path.display().to_string()),
        _ => LoadError::Io(path.display().to_string(), e.to_string()),
    })
}

/// Build a dataset from the text of a word list.
pub fn build_dataset(source: Source, content: &str) -> Dataset {
    match source {
        Source::Phrases => build_phrases(&parse_phrases(content)),
        Source::Vocabulary => build_vocabulary(&parse_vocabulary(content)),
    }
}

/// Lazily built, process-lifetime datasets for both sources.
#[derive(Debug)]
pub struct Library {
    data_dir: PathBuf,
    phrases: OnceLock<Dataset>,
    vocabulary: OnceLock<Dataset>,
}

impl Library {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            phrases: OnceLock::new(),
            vocabulary: OnceLock::new(),
        }
    }

    pub fn source_path(&self, source: Source) -> PathBuf {
        self.data_dir.join(source.file_name())
    }

    /// The built tree for `source`, loading it on first use.
    pub fn dataset(&self, source: Source) -> Result<&Dataset, LoadError> {
        let cell = match source {
            Source::Phrases => &self.phrases,
            Source::Vocabulary => &self.vocabulary,
        };
        if let Some(dataset) = cell.get() {
            return Ok(dataset);
        }

        let dataset = self.load(source)?;
        Ok(cell.get_or_init(|| dataset))
    }

    fn load(&self, source: Source) -> Result<Dataset, LoadError> {
        let path = self.source_path(source);
        let content = match read_source_file(&path) {
            Ok(content) => content,
            Err(LoadError::FileNotFound(_)) => {
                tracing::debug!("{} not in data dir, using bundled copy", source.file_name());
                source.bundled().to_string()
            }
            Err(e) => return Err(e),
        };

        let dataset = build_dataset(source, &content);
        tracing::debug!(
            "Built {} dataset: {} categories, {} cards",
            source,
            dataset.categories.len(),
            dataset.card_count()
        );
        Ok(dataset)
    }
}
