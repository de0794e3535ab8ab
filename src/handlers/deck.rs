//! Studying one collection: open, navigate, flip and grade.
//!
//! Every action answers with the full deck view so the client can render without
//! further requests.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

use crate::content::Source;
use crate::db::{PreferenceStore, StoreResult};
use crate::domain::{Card, CardMode, CardStatus, CollectionPath, FilterMode};
use crate::session::session_key;
use crate::state::AppState;
use crate::study::{Deck, ProgressSummary};

use super::{error_response, load_error, store_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
  Open,
  Next,
  Previous,
  Flip,
  Correct,
  Wrong,
}

impl DeckAction {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "open" => Some(Self::Open),
      "next" => Some(Self::Next),
      "previous" => Some(Self::Previous),
      "flip" => Some(Self::Flip),
      "correct" => Some(Self::Correct),
      "wrong" => Some(Self::Wrong),
      _ => None,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct DeckRequest {
  pub source: Source,
  pub category: String,
  pub group: String,
  #[serde(default)]
  pub sub_group: Option<String>,
}

impl DeckRequest {
  fn path(&self) -> CollectionPath {
    let sub_group = self.sub_group.as_deref().filter(|s| !s.is_empty());
    CollectionPath::new(&self.category, &self.group, sub_group)
  }
}

#[derive(Debug, Serialize)]
pub struct FaceView {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub glyph: Option<String>,
  pub text: String,
}

/// Everything needed to render a deck
#[derive(Debug, Serialize)]
pub struct DeckView {
  pub source: Source,
  pub collection_key: String,
  pub index: usize,
  pub total: usize,
  pub flipped: bool,
  /// The filter matched nothing and every card is shown
  pub fell_back: bool,
  pub filter_mode: FilterMode,
  pub card_mode: CardMode,
  pub card: Option<Card>,
  pub face: Option<FaceView>,
  pub status: Option<CardStatus>,
  pub speech_text: Option<String>,
  pub summary: ProgressSummary,
  /// Share of the collection marked correct, 0-100
  pub percent_correct: usize,
}

impl DeckView {
  pub fn from_deck<S: PreferenceStore>(source: Source, deck: &Deck<S>) -> StoreResult<Self> {
    let summary = deck.summary()?;
    Ok(Self {
      source,
      collection_key: deck.collection_key(),
      index: deck.index(),
      total: deck.len(),
      flipped: deck.is_flipped(),
      fell_back: deck.fell_back(),
      filter_mode: deck.filter_mode(),
      card_mode: deck.card_mode(),
      card: deck.current().cloned(),
      face: deck.visible_face().map(|face| FaceView {
        glyph: face.glyph.map(str::to_string),
        text: face.text.to_string(),
      }),
      status: deck.current_status()?,
      speech_text: deck.speech_text().map(str::to_string),
      percent_correct: summary.percentage(),
      summary,
    })
  }
}

/// Apply `action` to an open deck
pub fn apply_action<S: PreferenceStore>(deck: &mut Deck<S>, action: DeckAction) -> StoreResult<()> {
  match action {
    DeckAction::Open => Ok(()),
    DeckAction::Next => deck.advance(),
    DeckAction::Previous => deck.retreat(),
    DeckAction::Flip => {
      deck.flip();
      Ok(())
    }
    DeckAction::Correct => deck.mark_correct(),
    DeckAction::Wrong => deck.mark_wrong(),
  }
}

/// POST /api/deck/{action}
///
/// `open` always rebuilds the deck from stored state. Other actions reuse the open
/// deck for the collection, opening one first if none is cached.
pub async fn deck_action(
  State(state): State<AppState>,
  Path(action): Path<String>,
  Json(request): Json<DeckRequest>,
) -> Response {
  let Some(action) = DeckAction::from_str(&action) else {
    return error_response(StatusCode::NOT_FOUND, &format!("Unknown deck action: {}", action));
  };

  let source = request.source;
  let path = request.path();
  let key = session_key(source, &path);

  let open = || {
    let dataset = state.library.dataset(source).map_err(|e| load_error(source, e))?;
    let cards = dataset
      .cards_for_path(&path.category, &path.group, path.sub_group.as_deref())
      .to_vec();
    Deck::open(state.prefs.clone(), path.clone(), cards).map_err(store_error)
  };

  let result = state.decks.with_deck_or_open(&key, action == DeckAction::Open, open, |deck| {
    apply_action(deck, action).map_err(store_error)?;
    DeckView::from_deck(source, deck).map_err(store_error)
  });

  match result {
    Ok(view) => (StatusCode::OK, Json(view)).into_response(),
    Err(response) => response,
  }
}
