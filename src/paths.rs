//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data"). The word lists
//!   (`phrases.csv`, `vocabulary.csv`) and the default progress database live here.

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default SQLite progress database path
pub fn db_path() -> String {
    format!("{}/progress.db", data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    // OnceLock initializes once, so only the default shape is checked here.

    #[test]
    fn test_data_dir_not_empty() {
        assert!(!data_dir().is_empty());
    }

    #[test]
    fn test_db_path_format() {
        assert!(db_path().ends_with("/progress.db"));
    }
}
