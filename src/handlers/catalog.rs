//! Browsing the word lists: the card tree and the expandable menu.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::{Deserialize, Serialize};

use crate::content::{Dataset, Source};
use crate::db::{self, PreferenceStore, StoreResult};
use crate::domain::Group;
use crate::state::AppState;

use super::{error_response, load_error, parse_source, store_error};

/// Full card tree of a source.
///
/// GET /api/sources/{source}
pub async fn source_tree(State(state): State<AppState>, Path(source): Path<String>) -> Response {
  let source = match parse_source(&source) {
    Ok(source) => source,
    Err(response) => return response,
  };

  match state.library.dataset(source) {
    Ok(dataset) => (StatusCode::OK, Json(dataset)).into_response(),
    Err(e) => load_error(source, e),
  }
}

#[derive(Debug, Serialize)]
pub struct MenuGroup {
  pub name: String,
  pub menu_key: String,
  pub expanded: bool,
  pub card_count: usize,
  /// Empty for groups that hold cards directly
  pub sub_groups: Vec<MenuSubGroup>,
}

#[derive(Debug, Serialize)]
pub struct MenuSubGroup {
  pub name: String,
  pub card_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MenuCategory {
  pub name: String,
  pub menu_key: String,
  pub expanded: bool,
  pub groups: Vec<MenuGroup>,
}

#[derive(Debug, Serialize)]
pub struct MenuView {
  pub source: Source,
  pub menu_key: String,
  pub expanded: bool,
  pub categories: Vec<MenuCategory>,
}

fn menu_group<S: PreferenceStore + ?Sized>(store: &S, category: &str, group: &Group) -> StoreResult<MenuGroup> {
  let menu_key = db::group_menu_key(category, &group.name);
  Ok(MenuGroup {
    name: group.name.clone(),
    expanded: db::is_menu_expanded(store, &menu_key)?,
    menu_key,
    card_count: group.card_count(),
    sub_groups: group
      .sub_groups()
      .iter()
      .map(|sub| MenuSubGroup {
        name: sub.name.clone(),
        card_count: sub.cards.len(),
      })
      .collect(),
  })
}

/// Menu tree of `dataset` annotated with the stored expansion flags
pub fn build_menu<S: PreferenceStore + ?Sized>(store: &S, source: Source, dataset: &Dataset) -> StoreResult<MenuView> {
  let mut categories = Vec::with_capacity(dataset.categories.len());
  for category in &dataset.categories {
    let menu_key = db::category_menu_key(&category.name);
    let groups = category
      .groups
      .iter()
      .map(|group| menu_group(store, &category.name, group))
      .collect::<StoreResult<Vec<_>>>()?;
    categories.push(MenuCategory {
      name: category.name.clone(),
      expanded: db::is_menu_expanded(store, &menu_key)?,
      menu_key,
      groups,
    });
  }

  let menu_key = source.section_menu_key();
  Ok(MenuView {
    source,
    expanded: db::is_menu_expanded(store, &menu_key)?,
    menu_key,
    categories,
  })
}

/// GET /api/sources/{source}/menu
pub async fn source_menu(State(state): State<AppState>, Path(source): Path<String>) -> Response {
  let source = match parse_source(&source) {
    Ok(source) => source,
    Err(response) => return response,
  };

  let dataset = match state.library.dataset(source) {
    Ok(dataset) => dataset,
    Err(e) => return load_error(source, e),
  };

  match build_menu(&state.prefs, source, dataset) {
    Ok(menu) => (StatusCode::OK, Json(menu)).into_response(),
    Err(e) => store_error(e),
  }
}

#[derive(Debug, Deserialize)]
pub struct ToggleMenuRequest {
  pub key: String,
}

/// Flip one menu node's expansion flag.
///
/// POST /api/menu/toggle
pub async fn toggle_menu(State(state): State<AppState>, Json(request): Json<ToggleMenuRequest>) -> Response {
  if request.key.trim().is_empty() {
    return error_response(StatusCode::BAD_REQUEST, "Menu key must not be empty");
  }

  match db::toggle_menu_expanded(&state.prefs, &request.key) {
    Ok(expanded) => (
      StatusCode::OK,
      Json(serde_json::json!({ "key": request.key, "expanded": expanded })),
    )
      .into_response(),
    Err(e) => store_error(e),
  }
}
