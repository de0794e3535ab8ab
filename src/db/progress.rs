//! Learner progress stored through a [`PreferenceStore`].
//!
//! Key layout:
//! - `status_<card id>`: card status
//! - `position_<collection key>`: cursor into the collection's filtered list
//! - `filter_mode`, `card_mode`: global modes
//! - `expanded_<menu key>`: menu expansion flags

use std::collections::HashMap;

use super::preferences::PreferenceStore;
use super::StoreResult;
use crate::domain::{CardMode, CardStatus, CollectionPath, FilterMode};

pub const STATUS_PREFIX: &str = "status_";
pub const POSITION_PREFIX: &str = "position_";
pub const EXPANDED_PREFIX: &str = "expanded_";
pub const FILTER_MODE_KEY: &str = "filter_mode";
pub const CARD_MODE_KEY: &str = "card_mode";

// ==================== Card Status ====================

pub fn get_card_status<S: PreferenceStore + ?Sized>(store: &S, card_id: &str) -> StoreResult<CardStatus> {
  Ok(
    store
      .get_string(&format!("{STATUS_PREFIX}{card_id}"))?
      .map(|s| CardStatus::from_str(&s))
      .unwrap_or_default(),
  )
}

pub fn set_card_status<S: PreferenceStore + ?Sized>(
  store: &S,
  card_id: &str,
  status: CardStatus,
) -> StoreResult<()> {
  store.set_string(&format!("{STATUS_PREFIX}{card_id}"), status.as_str())
}

fn statuses_with_prefix<S: PreferenceStore + ?Sized>(
  store: &S,
  card_id_prefix: &str,
) -> StoreResult<HashMap<String, CardStatus>> {
  Ok(
    store
      .entries_with_prefix(&format!("{STATUS_PREFIX}{card_id_prefix}"))?
      .into_iter()
      .map(|(key, value)| (key[STATUS_PREFIX.len()..].to_string(), CardStatus::from_str(&value)))
      .collect(),
  )
}

/// Every recorded status, keyed by card id. Cards never marked are absent.
pub fn all_card_statuses<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<HashMap<String, CardStatus>> {
  statuses_with_prefix(store, "")
}

/// Recorded statuses of the cards in one collection, keyed by card id
pub fn collection_card_statuses<S: PreferenceStore + ?Sized>(
  store: &S,
  path: &CollectionPath,
) -> StoreResult<HashMap<String, CardStatus>> {
  statuses_with_prefix(store, &path.card_id_prefix())
}

/// Clear every card status. Positions are left alone.
pub fn reset_all_progress<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<usize> {
  let removed = store.remove_with_prefix(STATUS_PREFIX)?;
  tracing::info!("Reset progress: cleared {} card statuses", removed);
  Ok(removed)
}

// ==================== Collection Positions ====================

pub fn get_position<S: PreferenceStore + ?Sized>(store: &S, collection_key: &str) -> StoreResult<i64> {
  Ok(
    store
      .get_int(&format!("{POSITION_PREFIX}{collection_key}"))?
      .unwrap_or(0),
  )
}

pub fn set_position<S: PreferenceStore + ?Sized>(
  store: &S,
  collection_key: &str,
  position: i64,
) -> StoreResult<()> {
  store.set_int(&format!("{POSITION_PREFIX}{collection_key}"), position)
}

/// Clear every stored cursor. Statuses are left alone.
pub fn reset_all_positions<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<usize> {
  let removed = store.remove_with_prefix(POSITION_PREFIX)?;
  tracing::info!("Reset positions: cleared {} collection cursors", removed);
  Ok(removed)
}

// ==================== Modes ====================

pub fn get_filter_mode<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<FilterMode> {
  Ok(
    store
      .get_string(FILTER_MODE_KEY)?
      .map(|s| FilterMode::from_str(&s))
      .unwrap_or_default(),
  )
}

pub fn set_filter_mode<S: PreferenceStore + ?Sized>(store: &S, mode: FilterMode) -> StoreResult<()> {
  store.set_string(FILTER_MODE_KEY, mode.as_str())
}

pub fn get_card_mode<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<CardMode> {
  Ok(
    store
      .get_string(CARD_MODE_KEY)?
      .map(|s| CardMode::from_str(&s))
      .unwrap_or_default(),
  )
}

pub fn set_card_mode<S: PreferenceStore + ?Sized>(store: &S, mode: CardMode) -> StoreResult<()> {
  store.set_string(CARD_MODE_KEY, mode.as_str())
}

// ==================== Menu Expansion ====================

/// Menu key of a category entry
pub fn category_menu_key(category: &str) -> String {
  format!("category_{category}")
}

/// Menu key of a group entry inside a category
pub fn group_menu_key(category: &str, group: &str) -> String {
  format!("level1_{category}_{group}")
}

pub fn is_menu_expanded<S: PreferenceStore + ?Sized>(store: &S, menu_key: &str) -> StoreResult<bool> {
  Ok(
    store
      .get_bool(&format!("{EXPANDED_PREFIX}{menu_key}"))?
      .unwrap_or(false),
  )
}

pub fn set_menu_expanded<S: PreferenceStore + ?Sized>(
  store: &S,
  menu_key: &str,
  expanded: bool,
) -> StoreResult<()> {
  store.set_bool(&format!("{EXPANDED_PREFIX}{menu_key}"), expanded)
}

/// Flip a menu flag and return the new value
pub fn toggle_menu_expanded<S: PreferenceStore + ?Sized>(store: &S, menu_key: &str) -> StoreResult<bool> {
  let expanded = !is_menu_expanded(store, menu_key)?;
  set_menu_expanded(store, menu_key, expanded)?;
  Ok(expanded)
}
