//! Choosing which cards of a collection are shown, and where to resume.

use std::collections::HashMap;

use crate::domain::{Card, CardStatus, CollectionPath, FilterMode};

/// Status of `card` within `path`, defaulting to unseen.
pub fn status_of(statuses: &HashMap<String, CardStatus>, path: &CollectionPath, card: &Card) -> CardStatus {
  statuses
    .get(&path.card_id(&card.primary_text))
    .copied()
    .unwrap_or_default()
}

/// Cards of the collection admitted by `mode`, in collection order.
pub fn filter_cards(
  mode: FilterMode,
  path: &CollectionPath,
  cards: &[Card],
  statuses: &HashMap<String, CardStatus>,
) -> Vec<Card> {
  cards
    .iter()
    .filter(|card| mode.admits(status_of(statuses, path, card)))
    .cloned()
    .collect()
}

/// The active list for a collection plus the cursor to resume at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  pub cards: Vec<Card>,
  pub index: usize,
  /// The filter matched nothing and the full list is shown instead
  pub fell_back: bool,
}

/// Apply `mode` and resolve the cursor.
///
/// An empty filter result never yields an empty deck: the unfiltered list is used
/// with the cursor at 0. Otherwise the stored position is clamped into range.
pub fn select(
  mode: FilterMode,
  path: &CollectionPath,
  cards: &[Card],
  statuses: &HashMap<String, CardStatus>,
  stored_position: i64,
) -> Selection {
  let filtered = filter_cards(mode, path, cards, statuses);

  if filtered.is_empty() {
    return Selection {
      cards: cards.to_vec(),
      index: 0,
      fell_back: !cards.is_empty(),
    };
  }

  let last = filtered.len() as i64 - 1;
  Selection {
    index: stored_position.clamp(0, last) as usize,
    cards: filtered,
    fell_back: false,
  }
}
