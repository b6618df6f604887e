use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use super::extract::ApiQuery;
use super::parse_module;
use crate::config::DEFAULT_USER_ID;
use crate::db::{self, try_lock, TopicProgress};
use crate::domain::Item;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
  pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsQuery {
  pub user_id: Option<i64>,
}

/// GET /api/catalog/{module}?topic= - items in catalog order
pub async fn list_items(
  State(state): State<AppState>,
  Path(module): Path<String>,
  ApiQuery(query): ApiQuery<CatalogQuery>,
) -> Result<Json<Vec<Item>>, ApiError> {
  let module = parse_module(&module)?;
  let topic = query.topic.as_deref().filter(|t| !t.is_empty());
  let items = state
    .catalog
    .filtered(module, topic)
    .into_iter()
    .cloned()
    .collect();
  Ok(Json(items))
}

/// GET /api/topics?userId= - vocabulary topics with learned counts
pub async fn topics(
  State(state): State<AppState>,
  ApiQuery(query): ApiQuery<TopicsQuery>,
) -> Result<Json<Vec<TopicProgress>>, ApiError> {
  let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_topic_progress(&conn, &state.catalog, user_id)?))
}
