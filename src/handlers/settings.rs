//! Global study settings and the two bulk resets.
//!
//! Changing a mode or resetting stored state closes every open deck so the next
//! action rebuilds from the store.

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

use crate::db::{self, PreferenceStore, StoreResult};
use crate::domain::{CardMode, FilterMode};
use crate::state::AppState;

use super::store_error;

#[derive(Debug, Serialize)]
pub struct FilterOption {
  pub value: FilterMode,
  pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SettingsView {
  pub filter_mode: FilterMode,
  pub card_mode: CardMode,
  pub filter_options: Vec<FilterOption>,
}

pub fn settings_view<S: PreferenceStore + ?Sized>(store: &S) -> StoreResult<SettingsView> {
  Ok(SettingsView {
    filter_mode: db::get_filter_mode(store)?,
    card_mode: db::get_card_mode(store)?,
    filter_options: FilterMode::ALL_MODES
      .iter()
      .map(|mode| FilterOption {
        value: *mode,
        label: mode.label(),
      })
      .collect(),
  })
}

fn settings_response(state: &AppState) -> Response {
  match settings_view(&state.prefs) {
    Ok(view) => (StatusCode::OK, Json(view)).into_response(),
    Err(e) => store_error(e),
  }
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Response {
  settings_response(&state)
}

#[derive(Debug, Deserialize)]
pub struct FilterModeRequest {
  pub mode: FilterMode,
}

/// POST /api/settings/filter-mode
pub async fn update_filter_mode(State(state): State<AppState>, Json(request): Json<FilterModeRequest>) -> Response {
  if let Err(e) = db::set_filter_mode(&state.prefs, request.mode) {
    return store_error(e);
  }
  tracing::info!("Filter mode set to {}", request.mode.as_str());
  state.decks.clear();
  settings_response(&state)
}

#[derive(Debug, Deserialize)]
pub struct CardModeRequest {
  pub mode: CardMode,
}

/// POST /api/settings/card-mode
pub async fn update_card_mode(State(state): State<AppState>, Json(request): Json<CardModeRequest>) -> Response {
  if let Err(e) = db::set_card_mode(&state.prefs, request.mode) {
    return store_error(e);
  }
  tracing::info!("Card mode set to {}", request.mode.as_str());
  state.decks.clear();
  settings_response(&state)
}

/// Clear all stored cursors. Card statuses are kept.
///
/// POST /api/settings/reset-positions
pub async fn reset_positions(State(state): State<AppState>) -> Response {
  match db::reset_all_positions(&state.prefs) {
    Ok(removed) => {
      state.decks.clear();
      (StatusCode::OK, Json(serde_json::json!({ "removed": removed }))).into_response()
    }
    Err(e) => store_error(e),
  }
}

/// Clear all card statuses. Cursors are kept.
///
/// POST /api/settings/reset-progress
pub async fn reset_progress(State(state): State<AppState>) -> Response {
  match db::reset_all_progress(&state.prefs) {
    Ok(removed) => {
      state.decks.clear();
      (StatusCode::OK, Json(serde_json::json!({ "removed": removed }))).into_response()
    }
    Err(e) => store_error(e),
  }
}
