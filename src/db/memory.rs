use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::preferences::PreferenceStore;
use super::{StoreError, StoreResult};

/// Non-persistent preference store, used by tests and previews.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
  values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored keys
  pub fn len(&self) -> usize {
    self.values.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn values(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, String>>> {
    self.values.lock().map_err(|_| StoreError::Unavailable)
  }
}

impl PreferenceStore for MemoryPreferences {
  fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
    Ok(self.values()?.get(key).cloned())
  }

  fn set_string(&self, key: &str, value: &str) -> StoreResult<()> {
    self.values()?.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> StoreResult<()> {
    self.values()?.remove(key);
    Ok(())
  }

  fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
    Ok(
      self
        .values()?
        .keys()
        .filter(|k| k.starts_with(prefix))
        .cloned()
        .collect(),
    )
  }

  fn entries_with_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
    Ok(
      self
        .values()?
        .range(prefix.to_string()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect(),
    )
  }
}
