//! Application state shared by all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::content::Library;
use crate::db::{DbPool, SqlitePreferences};
use crate::session::DeckSessions;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Persisted statuses, cursors, modes and menu expansion
    pub prefs: SqlitePreferences,

    /// Word lists, loaded on first use
    pub library: Arc<Library>,

    /// Decks currently open, keyed by source and collection
    pub decks: Arc<DeckSessions<SqlitePreferences>>,
}

impl AppState {
    pub fn new(pool: DbPool, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefs: SqlitePreferences::new(pool),
            library: Arc::new(Library::new(data_dir)),
            decks: Arc::new(DeckSessions::new()),
        }
    }
}
