//! The preference store interface and its SQLite implementation.
//!
//! Everything persistent (card statuses, collection positions, filter and card
//! modes, menu expansion flags) goes through [`PreferenceStore`]. The store is passed
//! explicitly to whoever needs it; nothing reaches for a global.

use std::sync::Arc;

use super::settings::{
  delete_setting, delete_settings_with_prefix, get_setting, set_setting, setting_keys_with_prefix,
  settings_with_prefix,
};
use super::{try_lock, DbPool, StoreResult};

/// Key-value preference storage.
///
/// Integers and booleans are stored as text; a value that fails to parse reads as
/// absent.
pub trait PreferenceStore {
  fn get_string(&self, key: &str) -> StoreResult<Option<String>>;

  fn set_string(&self, key: &str, value: &str) -> StoreResult<()>;

  fn remove(&self, key: &str) -> StoreResult<()>;

  /// All keys starting with `prefix`, sorted
  fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>>;

  /// All `(key, value)` pairs whose key starts with `prefix`, sorted by key
  fn entries_with_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for key in self.keys_with_prefix(prefix)? {
      if let Some(value) = self.get_string(&key)? {
        entries.push((key, value));
      }
    }
    Ok(entries)
  }

  /// Remove every key starting with `prefix`, returning how many were removed
  fn remove_with_prefix(&self, prefix: &str) -> StoreResult<usize> {
    let keys = self.keys_with_prefix(prefix)?;
    for key in &keys {
      self.remove(key)?;
    }
    Ok(keys.len())
  }

  fn get_int(&self, key: &str) -> StoreResult<Option<i64>> {
    Ok(self.get_string(key)?.and_then(|v| v.parse().ok()))
  }

  fn set_int(&self, key: &str, value: i64) -> StoreResult<()> {
    self.set_string(key, &value.to_string())
  }

  fn get_bool(&self, key: &str) -> StoreResult<Option<bool>> {
    Ok(match self.get_string(key)?.as_deref() {
      Some("true") => Some(true),
      Some("false") => Some(false),
      _ => None,
    })
  }

  fn set_bool(&self, key: &str, value: bool) -> StoreResult<()> {
    self.set_string(key, if value { "true" } else { "false" })
  }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
  fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
    (**self).get_string(key)
  }

  fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
    (**self).set_string(key, value)
  }

  fn remove(&self, key: &str) -> StoreResult<()> {
    (**self).remove(key)
  }

  fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
    (**self).keys_with_prefix(prefix)
  }

  fn entries_with_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
    (**self).entries_with_prefix(prefix)
  }

  fn remove_with_prefix(&self, prefix: &str) -> StoreResult<usize> {
    (**self).remove_with_prefix(prefix)
  }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
  fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
    (**self).get_string(key)
  }

  fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
    (**self).set_string(key, value)
  }

  fn remove(&self, key: &str) -> StoreResult<()> {
    (**self).remove(key)
  }

  fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
    (**self).keys_with_prefix(prefix)
  }

  fn entries_with_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
    (**self).entries_with_prefix(prefix)
  }

  fn remove_with_prefix(&self, prefix: &str) -> StoreResult<usize> {
    (**self).remove_with_prefix(prefix)
  }
}

/// Preferences kept in the `settings` table of a SQLite database.
#[derive(Clone)]
pub struct SqlitePreferences {
  pool: DbPool,
}

impl SqlitePreferences {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }
}

impl PreferenceStore for SqlitePreferences {
  fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
    let conn = try_lock(&self.pool)?;
    Ok(get_setting(&conn, key)?)
  }

  fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    Ok(set_setting(&conn, key, value)?)
  }

  fn remove(&self, key: &str) -> StoreResult<()> {
    let conn = try_lock(&self.pool)?;
    Ok(delete_setting(&conn, key)?)
  }

  fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
    let conn = try_lock(&self.pool)?;
    Ok(setting_keys_with_prefix(&conn, prefix)?)
  }

  fn entries_with_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
    let conn = try_lock(&self.pool)?;
    Ok(settings_with_prefix(&conn, prefix)?)
  }

  fn remove_with_prefix(&self, prefix: &str) -> StoreResult<usize> {
    let conn = try_lock(&self.pool)?;
    Ok(delete_settings_with_prefix(&conn, prefix)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::init_memory_db;

  fn store() -> SqlitePreferences {
    SqlitePreferences::new(init_memory_db().unwrap())
  }

  #[test]
  fn test_int_roundtrip_and_default() {
    let prefs = store();
    assert_eq!(prefs.get_int("position_a").unwrap(), None);
    prefs.set_int("position_a", 7).unwrap();
    assert_eq!(prefs.get_int("position_a").unwrap(), Some(7));
  }

  #[test]
  fn test_unparseable_int_reads_as_absent() {
    let prefs = store();
    prefs.set_string("position_a", "seven").unwrap();
    assert_eq!(prefs.get_int("position_a").unwrap(), None);
  }

  #[test]
  fn test_bool_roundtrip() {
    let prefs = store();
    assert_eq!(prefs.get_bool("expanded_x").unwrap(), None);
    prefs.set_bool("expanded_x", true).unwrap();
    assert_eq!(prefs.get_bool("expanded_x").unwrap(), Some(true));
    prefs.set_bool("expanded_x", false).unwrap();
    assert_eq!(prefs.get_bool("expanded_x").unwrap(), Some(false));
  }

  #[test]
  fn test_remove_with_prefix() {
    let prefs = store();
    prefs.set_int("position_a", 1).unwrap();
    prefs.set_int("position_b", 2).unwrap();
    prefs.set_string("status_a", "WRONG").unwrap();

    assert_eq!(prefs.remove_with_prefix("position_").unwrap(), 2);
    assert!(prefs.keys_with_prefix("position_").unwrap().is_empty());
    assert_eq!(prefs.keys_with_prefix("status_").unwrap(), vec!["status_a".to_string()]);
  }

  #[test]
  fn test_entries_with_prefix() {
    let prefs = store();
    prefs.set_string("status_b", "WRONG").unwrap();
    prefs.set_string("status_a", "CORRECT").unwrap();
    prefs.set_int("position_a", 1).unwrap();

    assert_eq!(
      prefs.entries_with_prefix("status_").unwrap(),
      vec![
        ("status_a".to_string(), "CORRECT".to_string()),
        ("status_b".to_string(), "WRONG".to_string()),
      ]
    );
  }

  #[test]
  fn test_clones_share_storage() {
    let a = store();
    let b = a.clone();
    a.set_string("card_mode", "READ").unwrap();
    assert_eq!(b.get_string("card_mode").unwrap(), Some("READ".to_string()));
  }

  #[test]
  fn test_reference_forwards() {
    let prefs = store();
    let by_ref: &dyn PreferenceStore = &prefs;
    by_ref.set_bool("expanded_y", true).unwrap();
    assert_eq!(prefs.get_bool("expanded_y").unwrap(), Some(true));
  }
}
