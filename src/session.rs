//! Simple in-memory storage for open study decks.
//!
//! Decks are keyed by `<source>:<collection key>` so each collection has at most one
//! open deck. Entries auto-expire after a configurable duration of inactivity. Cursor
//! and statuses live in the preference store, so an expired deck reopens where it
//! left off.

use crate::config;
use crate::content::Source;
use crate::db::PreferenceStore;
use crate::domain::CollectionPath;
use crate::study::Deck;
use chrono::{DateTime, Duration, Utc};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Deck entry with last access time for expiration
struct SessionEntry<S: PreferenceStore> {
  deck: Deck<S>,
  last_access: DateTime<Utc>,
}

pub struct DeckSessions<S: PreferenceStore> {
  entries: Mutex<HashMap<String, SessionEntry<S>>>,
}

/// Registry key for a collection of `source`
pub fn session_key(source: Source, path: &CollectionPath) -> String {
  format!("{}:{}", source.as_str(), path.collection_key())
}

impl<S: PreferenceStore> Default for DeckSessions<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: PreferenceStore> DeckSessions<S> {
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
    }
  }

  // Deck state is rebuilt from the store on reopen, so a poisoned map is still usable.
  fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry<S>>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Run `f` against the deck open under `key`.
  ///
  /// The deck is built with `open` first when none is cached or `reopen` is set. The
  /// registry stays locked from opening through `f`, so a concurrent [`clear`] either
  /// precedes the open or removes the fresh deck afterwards.
  ///
  /// [`clear`]: DeckSessions::clear
  pub fn with_deck_or_open<R, E>(
    &self,
    key: &str,
    reopen: bool,
    open: impl FnOnce() -> Result<Deck<S>, E>,
    f: impl FnOnce(&mut Deck<S>) -> Result<R, E>,
  ) -> Result<R, E> {
    let mut entries = self.lock();

    // Clean up expired decks occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut entries);
    }

    let entry = match (entries.entry(key.to_string()), reopen) {
      (Entry::Occupied(occupied), false) => occupied.into_mut(),
      (slot, _) => {
        let deck = open()?;
        tracing::debug!("Opened deck {} with {} card(s)", key, deck.len());
        let fresh = SessionEntry {
          deck,
          last_access: Utc::now(),
        };
        match slot {
          Entry::Occupied(mut occupied) => {
            occupied.insert(fresh);
            occupied.into_mut()
          }
          Entry::Vacant(vacant) => vacant.insert(fresh),
        }
      }
    };

    entry.last_access = Utc::now();
    f(&mut entry.deck)
  }

  /// Close every open deck
  pub fn clear(&self) {
    let mut entries = self.lock();
    if !entries.is_empty() {
      tracing::debug!("Closing {} open deck(s)", entries.len());
    }
    entries.clear();
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }
}

/// Clean up expired decks
fn cleanup_expired<S: PreferenceStore>(entries: &mut HashMap<String, SessionEntry<S>>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  let before = entries.len();
  entries.retain(|_, entry| entry.last_access > expiry);
  let removed = before - entries.len();
  if removed > 0 {
    tracing::debug!("Expired {} idle deck(s)", removed);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::{self, MemoryPreferences, StoreError};
  use crate::domain::Card;
  use std::cell::Cell;
  use std::sync::Arc;
  use std::thread;

  fn open_deck(store: &Arc<MemoryPreferences>) -> Deck<Arc<MemoryPreferences>> {
    let path = CollectionPath::new("N5", "All", None);
    let cards = vec![
      Card::new("👋", "Hello", "konnichiwa"),
      Card::new("🙏", "Thank you", "arigatou"),
    ];
    Deck::open(store.clone(), path, cards).unwrap()
  }

  #[test]
  fn test_session_key() {
    let path = CollectionPath::new("Noun", "Food", Some("Fruit"));
    assert_eq!(session_key(Source::Vocabulary, &path), "vocabulary:Noun-Food-Fruit");

    let path = CollectionPath::new("N5", "All", None);
    assert_eq!(session_key(Source::Phrases, &path), "phrases:N5-All-");
  }

  type Sessions = DeckSessions<Arc<MemoryPreferences>>;

  fn advance_and_index(sessions: &Sessions, store: &Arc<MemoryPreferences>, reopen: bool) -> usize {
    sessions
      .with_deck_or_open(
        "phrases:N5-All-",
        reopen,
        || Ok::<_, StoreError>(open_deck(store)),
        |deck| {
          deck.advance()?;
          Ok(deck.index())
        },
      )
      .unwrap()
  }

  #[test]
  fn test_opens_once_then_reuses_deck() {
    let store = Arc::new(MemoryPreferences::new());
    let sessions = Sessions::new();
    let opens = Cell::new(0);

    for _ in 0..3 {
      sessions
        .with_deck_or_open(
          "phrases:N5-All-",
          false,
          || {
            opens.set(opens.get() + 1);
            Ok::<_, StoreError>(open_deck(&store))
          },
          |deck| {
            deck.flip();
            Ok(())
          },
        )
        .unwrap();
    }

    assert_eq!(opens.get(), 1);
    let flipped = sessions
      .with_deck_or_open("phrases:N5-All-", false, || Ok::<_, StoreError>(open_deck(&store)), |deck| {
        Ok(deck.is_flipped())
      })
      .unwrap();
    assert!(flipped);
  }

  #[test]
  fn test_reopen_rebuilds_from_store() {
    let store = Arc::new(MemoryPreferences::new());
    let sessions = Sessions::new();
    assert_eq!(advance_and_index(&sessions, &store, false), 1);
    assert_eq!(advance_and_index(&sessions, &store, false), 0);

    db::set_position(&*store, "N5-All-", 1).unwrap();
    // A reopen resumes from the stored position
    assert_eq!(advance_and_index(&sessions, &store, true), 0);
  }

  #[test]
  fn test_open_failure_leaves_registry_untouched() {
    let sessions = Sessions::new();
    let result = sessions.with_deck_or_open(
      "phrases:N5-All-",
      false,
      || Err(StoreError::Unavailable),
      |deck| Ok(deck.index()),
    );
    assert!(matches!(result, Err(StoreError::Unavailable)));
    assert!(sessions.is_empty());
  }

  #[test]
  fn test_clear_during_open_removes_fresh_deck() {
    let store = Arc::new(MemoryPreferences::new());
    let sessions = Arc::new(Sessions::new());
    let mut clearer = None;

    sessions
      .with_deck_or_open(
        "phrases:N5-All-",
        false,
        || {
          // A settings change lands while the deck is being built
          let sessions = sessions.clone();
          clearer = Some(thread::spawn(move || sessions.clear()));
          Ok::<_, StoreError>(open_deck(&store))
        },
        |_| Ok(()),
      )
      .unwrap();

    clearer.unwrap().join().unwrap();
    assert!(sessions.is_empty());
  }

  #[test]
  fn test_cleanup_keeps_recent_decks() {
    let store = Arc::new(MemoryPreferences::new());
    let sessions = Sessions::new();
    advance_and_index(&sessions, &store, false);
    cleanup_expired(&mut sessions.lock());
    assert_eq!(sessions.lock().len(), 1);
  }

  #[test]
  fn test_cleanup_drops_idle_decks() {
    let store = Arc::new(MemoryPreferences::new());
    let sessions = Sessions::new();
    advance_and_index(&sessions, &store, false);
    if let Some(entry) = sessions.lock().get_mut("phrases:N5-All-") {
      entry.last_access = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
    }
    cleanup_expired(&mut sessions.lock());
    assert!(sessions.is_empty());
  }
}
