//! A card collection opened for study.
//!
//! Opening a deck reads the global filter and card modes, filters the collection by
//! recorded status and resumes at the stored cursor. Navigation and grading write
//! straight through to the preference store.

use crate::db::{self, PreferenceStore, StoreResult};
use crate::domain::{Card, CardMode, CardStatus, CollectionPath, FilterMode};

use super::filter::select;
use super::summary::ProgressSummary;

/// The face of a card currently presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace<'a> {
  /// Hidden in read mode
  pub glyph: Option<&'a str>,
  pub text: &'a str,
}

pub struct Deck<S: PreferenceStore> {
  store: S,
  path: CollectionPath,
  all_cards: Vec<Card>,
  cards: Vec<Card>,
  index: usize,
  flipped: bool,
  filter_mode: FilterMode,
  card_mode: CardMode,
  fell_back: bool,
}

impl<S: PreferenceStore> Deck<S> {
  /// Open the collection at `path` whose full card list is `cards`.
  pub fn open(store: S, path: CollectionPath, cards: Vec<Card>) -> StoreResult<Self> {
    let mut deck = Self {
      store,
      path,
      all_cards: cards,
      cards: Vec::new(),
      index: 0,
      flipped: false,
      filter_mode: FilterMode::default(),
      card_mode: CardMode::default(),
      fell_back: false,
    };
    deck.refresh()?;
    Ok(deck)
  }

  /// Re-read modes and statuses and rebuild the active list.
  fn refresh(&mut self) -> StoreResult<()> {
    self.filter_mode = db::get_filter_mode(&self.store)?;
    self.card_mode = db::get_card_mode(&self.store)?;

    let statuses = db::collection_card_statuses(&self.store, &self.path)?;
    let position = db::get_position(&self.store, &self.path.collection_key())?;
    let selection = select(self.filter_mode, &self.path, &self.all_cards, &statuses, position);

    if selection.fell_back {
      tracing::debug!(
        "No cards in {} match {}; showing all {}",
        self.path.collection_key(),
        self.filter_mode.as_str(),
        selection.cards.len()
      );
    }

    self.cards = selection.cards;
    self.index = selection.index;
    self.fell_back = selection.fell_back;
    self.flipped = false;
    Ok(())
  }

  pub fn collection_key(&self) -> String {
    self.path.collection_key()
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn current(&self) -> Option<&Card> {
    self.cards.get(self.index)
  }

  pub fn current_id(&self) -> Option<String> {
    self.current().map(|card| self.path.card_id(&card.primary_text))
  }

  pub fn current_status(&self) -> StoreResult<Option<CardStatus>> {
    match self.current_id() {
      Some(id) => Ok(Some(db::get_card_status(&self.store, &id)?)),
      None => Ok(None),
    }
  }

  pub fn is_flipped(&self) -> bool {
    self.flipped
  }

  pub fn filter_mode(&self) -> FilterMode {
    self.filter_mode
  }

  pub fn card_mode(&self) -> CardMode {
    self.card_mode
  }

  /// True when the filter matched nothing and the full list is shown
  pub fn fell_back(&self) -> bool {
    self.fell_back
  }

  pub fn flip(&mut self) {
    self.flipped = !self.flipped;
  }

  /// The side of the current card that is showing.
  ///
  /// Recall mode leads with the meaning and shows the glyph; read mode leads with the
  /// pronunciation and hides it. Flipping swaps the text.
  pub fn visible_face(&self) -> Option<CardFace<'_>> {
    let card = self.current()?;
    let (front, back) = match self.card_mode {
      CardMode::Recall => (&card.primary_text, &card.secondary_text),
      CardMode::Read => (&card.secondary_text, &card.primary_text),
    };
    Some(CardFace {
      glyph: match self.card_mode {
        CardMode::Recall => Some(card.glyph.as_str()),
        CardMode::Read => None,
      },
      text: if self.flipped { back } else { front },
    })
  }

  /// Text to hand to a speech engine for the current card
  pub fn speech_text(&self) -> Option<&str> {
    self.current().map(|card| card.secondary_text.as_str())
  }

  /// Move to the next card, wrapping to the first.
  pub fn advance(&mut self) -> StoreResult<()> {
    if self.cards.is_empty() {
      return Ok(());
    }
    let next = (self.index + 1) % self.cards.len();
    self.move_to(next)
  }

  /// Move to the previous card, wrapping to the last.
  pub fn retreat(&mut self) -> StoreResult<()> {
    if self.cards.is_empty() {
      return Ok(());
    }
    let previous = if self.index == 0 {
      self.cards.len() - 1
    } else {
      self.index - 1
    };
    self.move_to(previous)
  }

  fn move_to(&mut self, index: usize) -> StoreResult<()> {
    db::set_position(&self.store, &self.path.collection_key(), index as i64)?;
    self.index = index;
    self.flipped = false;
    Ok(())
  }

  pub fn mark_correct(&mut self) -> StoreResult<()> {
    self.mark(CardStatus::Correct)
  }

  pub fn mark_wrong(&mut self) -> StoreResult<()> {
    self.mark(CardStatus::Wrong)
  }

  /// Record `status` for the current card, then advance.
  fn mark(&mut self, status: CardStatus) -> StoreResult<()> {
    let Some(card_id) = self.current_id() else {
      return Ok(());
    };
    db::set_card_status(&self.store, &card_id, status)?;
    self.advance()
  }

  /// Status counts over the whole collection
  pub fn summary(&self) -> StoreResult<ProgressSummary> {
    let statuses = db::collection_card_statuses(&self.store, &self.path)?;
    Ok(ProgressSummary::from_statuses(&self.path, &self.all_cards, &statuses))
  }
}
