use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::extract::{ApiQuery, OptionalJson};
use crate::config::DEFAULT_USER_ID;
use crate::db::{self, try_lock};
use crate::domain::StreakCounts;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakQuery {
  pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdateRequest {
  #[serde(default)]
  pub user_id: Option<i64>,
}

/// GET /api/streak?userId= - zero counts when the user has no activity yet
pub async fn get_streak(
  State(state): State<AppState>,
  ApiQuery(query): ApiQuery<StreakQuery>,
) -> Result<Json<StreakCounts>, ApiError> {
  let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);
  let conn = try_lock(&state.db)?;
  let counts = db::get_user_streak(&conn, user_id)?
    .as_ref()
    .map(StreakCounts::from)
    .unwrap_or_default();
  Ok(Json(counts))
}

/// POST /api/streak/update - record one activity now. The body is optional.
pub async fn update_streak(
  State(state): State<AppState>,
  OptionalJson(req): OptionalJson<StreakUpdateRequest>,
) -> Result<Json<StreakCounts>, ApiError> {
  let user_id = req.user_id.unwrap_or(DEFAULT_USER_ID);
  let conn = try_lock(&state.db)?;
  let streak = db::record_activity(&conn, user_id, Utc::now())?;
  tracing::debug!("User {} streak now {}", user_id, streak.current_streak);
  Ok(Json(StreakCounts::from(&streak)))
}
