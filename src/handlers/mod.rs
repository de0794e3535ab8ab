pub mod catalog;
pub mod deck;
pub mod settings;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Json, Router,
};

use crate::content::{LoadError, Source};
use crate::db::StoreError;
use crate::state::AppState;

/// Build the JSON API router
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/sources/{source}", get(catalog::source_tree))
    .route("/api/sources/{source}/menu", get(catalog::source_menu))
    .route("/api/menu/toggle", post(catalog::toggle_menu))
    .route("/api/deck/{action}", post(deck::deck_action))
    .route("/api/settings", get(settings::get_settings))
    .route(
      "/api/settings/filter-mode",
      get(settings::get_settings).post(settings::update_filter_mode),
    )
    .route(
      "/api/settings/card-mode",
      get(settings::get_settings).post(settings::update_card_mode),
    )
    .route("/api/settings/reset-positions", post(settings::reset_positions))
    .route("/api/settings/reset-progress", post(settings::reset_progress))
    .with_state(state)
}

pub async fn health() -> impl IntoResponse {
  Json(serde_json::json!({ "status": "ok" }))
}

fn error_response(status: StatusCode, message: &str) -> Response {
  (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn store_error(e: StoreError) -> Response {
  tracing::error!("Preference store error: {}", e);
  error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access saved progress")
}

fn load_error(source: Source, e: LoadError) -> Response {
  tracing::error!("Failed to load {}: {}", source, e);
  error_response(StatusCode::SERVICE_UNAVAILABLE, e.user_message())
}

fn parse_source(raw: &str) -> Result<Source, Response> {
  raw
    .parse::<Source>()
    .map_err(|_| error_response(StatusCode::NOT_FOUND, &format!("Unknown source: {}", raw)))
}
