//! Progress store endpoints.
//!
//! Writes here are synchronous upserts. A malformed user id in a path yields an
//! empty list rather than an error.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use super::extract::ApiJson;
use super::SuccessResponse;
use crate::db::{self, parse_user_id, try_lock};
use crate::domain::{
  GrammarProgress, ModuleSummary, SpeakingProgress, VocabularyProgress, WritingProgress,
};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyProgressRequest {
  pub user_id: i64,
  pub word_id: String,
  pub learned: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarProgressRequest {
  pub user_id: i64,
  pub lesson_id: String,
  pub completed: bool,
  #[serde(default)]
  pub score: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingProgressRequest {
  pub user_id: i64,
  pub exercise_id: String,
  pub completed: bool,
  #[serde(default)]
  pub recording_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingProgressRequest {
  pub user_id: i64,
  pub prompt_id: String,
  pub submission: String,
  #[serde(default)]
  pub feedback: Option<String>,
}

fn require_id(field: &str, value: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(ApiError::BadRequest(format!("{field} must not be empty")));
  }
  Ok(())
}

// ==================== Vocabulary ====================

pub async fn vocabulary(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<VocabularyProgress>>, ApiError> {
  let Some(user_id) = parse_user_id(&user_id) else {
    return Ok(Json(Vec::new()));
  };
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_vocabulary_progress(&conn, user_id)?))
}

pub async fn save_vocabulary(
  State(state): State<AppState>,
  ApiJson(req): ApiJson<VocabularyProgressRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
  require_id("wordId", &req.word_id)?;
  let conn = try_lock(&state.db)?;
  db::upsert_vocabulary_progress(&conn, req.user_id, &req.word_id, req.learned, Utc::now())?;
  Ok(SuccessResponse::ok())
}

// ==================== Grammar ====================

pub async fn grammar(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<GrammarProgress>>, ApiError> {
  let Some(user_id) = parse_user_id(&user_id) else {
    return Ok(Json(Vec::new()));
  };
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_grammar_progress(&conn, user_id)?))
}

pub async fn save_grammar(
  State(state): State<AppState>,
  ApiJson(req): ApiJson<GrammarProgressRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
  require_id("lessonId", &req.lesson_id)?;
  let conn = try_lock(&state.db)?;
  db::upsert_grammar_progress(&conn, req.user_id, &req.lesson_id, req.completed, req.score)?;
  Ok(SuccessResponse::ok())
}

// ==================== Speaking ====================

pub async fn speaking(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<SpeakingProgress>>, ApiError> {
  let Some(user_id) = parse_user_id(&user_id) else {
    return Ok(Json(Vec::new()));
  };
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_speaking_progress(&conn, user_id)?))
}

pub async fn save_speaking(
  State(state): State<AppState>,
  ApiJson(req): ApiJson<SpeakingProgressRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
  require_id("exerciseId", &req.exercise_id)?;
  let conn = try_lock(&state.db)?;
  db::upsert_speaking_progress(
    &conn,
    req.user_id,
    &req.exercise_id,
    req.completed,
    req.recording_url.as_deref(),
  )?;
  Ok(SuccessResponse::ok())
}

// ==================== Writing ====================

pub async fn writing(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<WritingProgress>>, ApiError> {
  let Some(user_id) = parse_user_id(&user_id) else {
    return Ok(Json(Vec::new()));
  };
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_writing_progress(&conn, user_id)?))
}

pub async fn save_writing(
  State(state): State<AppState>,
  ApiJson(req): ApiJson<WritingProgressRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
  require_id("promptId", &req.prompt_id)?;
  let conn = try_lock(&state.db)?;
  db::upsert_writing_progress(
    &conn,
    req.user_id,
    &req.prompt_id,
    &req.submission,
    req.feedback.as_deref(),
  )?;
  Ok(SuccessResponse::ok())
}

// ==================== Summary ====================

/// GET /api/progress/summary/{userId} - completed/total per module
pub async fn summary(
  State(state): State<AppState>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<ModuleSummary>>, ApiError> {
  let Some(user_id) = parse_user_id(&user_id) else {
    return Ok(Json(Vec::new()));
  };
  let conn = try_lock(&state.db)?;
  Ok(Json(db::get_module_summaries(&conn, &state.catalog, user_id)?))
}
