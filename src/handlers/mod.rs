pub mod catalog;
pub mod extract;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod streak;

use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::SESSION_COOKIE_NAME;
use crate::domain::ModuleType;
use crate::error::ApiError;
use crate::session::generate_session_id;
use crate::state::AppState;

/// Body of successful write endpoints
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
}

impl SuccessResponse {
  pub fn ok() -> Json<Self> {
    Json(Self { success: true })
  }
}

/// Build the full API router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    // Progress store
    .route("/api/vocabulary/progress", post(progress::save_vocabulary))
    .route("/api/vocabulary/progress/{user_id}", get(progress::vocabulary))
    .route("/api/grammar/progress", post(progress::save_grammar))
    .route("/api/grammar/progress/{user_id}", get(progress::grammar))
    .route("/api/speaking/progress", post(progress::save_speaking))
    .route("/api/speaking/progress/{user_id}", get(progress::speaking))
    .route("/api/writing/progress", post(progress::save_writing))
    .route("/api/writing/progress/{user_id}", get(progress::writing))
    .route("/api/progress/summary/{user_id}", get(progress::summary))
    .route("/api/streak", get(streak::get_streak))
    .route("/api/streak/update", post(streak::update_streak))
    // Content
    .route("/api/catalog/{module}", get(catalog::list_items))
    .route("/api/topics", get(catalog::topics))
    // Practice sessions
    .route("/api/practice/{module}", get(practice::view))
    .route("/api/practice/{module}/start", post(practice::start))
    .route("/api/practice/{module}/next", post(practice::next))
    .route("/api/practice/{module}/previous", post(practice::previous))
    .route("/api/practice/{module}/flip", post(practice::flip))
    .route("/api/practice/{module}/jump", post(practice::jump))
    .route("/api/practice/{module}/restart", post(practice::restart))
    .route("/api/practice/{module}/toggle", post(practice::toggle))
    .route("/api/practice/{module}/answer", post(practice::answer))
    .route("/api/practice/{module}/record", post(practice::record))
    .route("/api/practice/{module}/submit", post(practice::submit))
    // Quiz game
    .route("/api/quiz", get(quiz::view))
    .route("/api/quiz/start", post(quiz::start))
    .route("/api/quiz/answer", post(quiz::answer))
    .route("/api/quiz/expire", post(quiz::expire))
    .route("/api/quiz/restart", post(quiz::restart))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn health() -> Json<serde_json::Value> {
  Json(serde_json::json!({
    "status": "ok",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

/// Existing client session id, or a fresh one added to the jar.
pub(crate) fn client_session(jar: CookieJar) -> (CookieJar, String) {
  if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
    let id = cookie.value().to_string();
    return (jar, id);
  }

  let id = generate_session_id();
  let cookie = Cookie::build((SESSION_COOKIE_NAME, id.clone()))
    .path("/")
    .http_only(true)
    .build();
  (jar.add(cookie), id)
}

pub(crate) fn parse_module(raw: &str) -> Result<ModuleType, ApiError> {
  ModuleType::from_str(raw).ok_or_else(|| ApiError::UnknownModule(raw.to_string()))
}
