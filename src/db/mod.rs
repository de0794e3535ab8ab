pub mod memory;
pub mod preferences;
pub mod progress;
pub mod schema;
pub mod settings;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use memory::MemoryPreferences;
pub use preferences::{PreferenceStore, SqlitePreferences};
pub use progress::*;
pub use schema::run_migrations;
pub use settings::{get_setting, set_setting};

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Failure of the preference store
#[derive(Debug)]
pub enum StoreError {
  Database(rusqlite::Error),
  Unavailable,
}

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::Database(e) => write!(f, "Preference store error: {}", e),
      StoreError::Unavailable => write!(f, "Preference store unavailable"),
    }
  }
}

impl std::error::Error for StoreError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StoreError::Database(e) => Some(e),
      StoreError::Unavailable => None,
    }
  }
}

impl From<rusqlite::Error> for StoreError {
  fn from(value: rusqlite::Error) -> Self {
    StoreError::Database(value)
  }
}

impl From<DbLockError> for StoreError {
  fn from(_: DbLockError) -> Self {
    StoreError::Unavailable
  }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> rusqlite::Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  tracing::debug!("Opened progress database at {}", path.display());
  Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database with the full schema
pub fn init_memory_db() -> rusqlite::Result<DbPool> {
  let conn = Connection::open_in_memory()?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn test_init_db_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/progress.db");
    let pool = init_db(&path).unwrap();
    assert!(path.exists());

    let conn = try_lock(&pool).unwrap();
    set_setting(&conn, "k", "v").unwrap();
    assert_eq!(get_setting(&conn, "k").unwrap(), Some("v".to_string()));
  }

  #[test]
  fn test_init_db_backs_up_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.db");
    drop(init_db(&path).unwrap());
    drop(init_db(&path).unwrap());
    assert!(temp.path().join("progress.db.backup").exists());
  }

  #[test]
  fn test_log_warn_default() {
    let failed: Result<i64, StoreError> = Err(StoreError::Unavailable);
    assert_eq!(failed.log_warn_default("reading position"), 0);

    let ok: Result<i64, StoreError> = Ok(3);
    assert_eq!(ok.log_warn_default("reading position"), 3);
  }

  #[test]
  fn test_store_error_from_lock_error() {
    let err: StoreError = DbLockError.into();
    assert!(matches!(err, StoreError::Unavailable));
    assert_eq!(err.to_string(), "Preference store unavailable");
  }
}
