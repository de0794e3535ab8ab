//! Test utilities for database and data directory setup.
//!
//! Provides helpers that reuse authoritative schema initialization,
//! eliminating schema duplication in test code.

use axum_test::TestServer;
use std::path::Path;
use tempfile::TempDir;

use crate::content::Source;
use crate::db::{self, SqlitePreferences};
use crate::handlers;
use crate::state::AppState;

/// Test environment with a migrated progress database and an empty data directory.
///
/// Word lists written with [`TestEnv::write_source`] are picked up by the library;
/// sources that are not written fall back to the bundled copies.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub state: AppState,
    /// Same store the handlers use, for assertions
    pub prefs: SqlitePreferences,
}

impl TestEnv {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let pool = db::init_db(&temp.path().join("progress.db"))?;
        let state = AppState::new(pool, temp.path());
        let prefs = state.prefs.clone();

        Ok(Self { temp, state, prefs })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a word list into the data directory. Must precede the first request for
    /// that source, since datasets are cached once loaded.
    pub fn write_source(&self, source: Source, content: &str) {
        std::fs::write(self.path().join(source.file_name()), content).unwrap();
    }

    /// A test server over the full router
    pub fn server(&self) -> TestServer {
        TestServer::new(handlers::router(self.state.clone())).unwrap()
    }
}
