//! Vocabulary quiz endpoints. One game per client session.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use super::client_session;
use crate::error::ApiError;
use crate::practice::{PracticeError, QuizAnswer, QuizGame, QuizView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub option: usize,
  /// Sequence number of the question being answered
  #[serde(default)]
  pub question: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ExpireRequest {
  pub question: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
  /// Outcome of the question just closed, if any
  pub result: Option<QuizAnswer>,
  pub state: QuizView,
}

type QuizResult = Result<(CookieJar, Json<QuizResponse>), ApiError>;

/// POST /api/quiz/start - new game, replacing any running one
pub async fn start(State(state): State<AppState>, jar: CookieJar) -> QuizResult {
  let (jar, session_id) = client_session(jar);
  let now = Utc::now();
  let game = QuizGame::start(&state.catalog, now)?;

  let view = state.sessions.with_session(&session_id, |session| {
    let view = game.view(now);
    session.quiz = Some(game);
    view
  })?;
  Ok((jar, Json(QuizResponse { result: None, state: view })))
}

/// GET /api/quiz
pub async fn view(State(state): State<AppState>, jar: CookieJar) -> QuizResult {
  let (jar, session_id) = client_session(jar);
  let now = Utc::now();
  let view = state
    .sessions
    .with_session(&session_id, |session| session.quiz.as_ref().map(|g| g.view(now)))?
    .ok_or(PracticeError::NoQuiz)?;
  Ok((jar, Json(QuizResponse { result: None, state: view })))
}

/// POST /api/quiz/answer
pub async fn answer(
  State(state): State<AppState>,
  jar: CookieJar,
  ApiJson(req): ApiJson<AnswerRequest>,
) -> QuizResult {
  let (jar, session_id) = client_session(jar);
  let now = Utc::now();

  let (result, view) = state.sessions.with_session(&session_id, |session| {
    let game = session.quiz.as_mut().ok_or(PracticeError::NoQuiz)?;
    let result = game.answer(req.option, req.question, now)?;
    Ok::<_, PracticeError>((result, game.view(now)))
  })??;

  if result.finished {
    tracing::info!("Quiz finished with score {}/{}", result.score, view.max_score);
  }
  Ok((jar, Json(QuizResponse { result: Some(result), state: view })))
}

/// POST /api/quiz/expire - the client countdown for `question` reached zero.
///
/// Stale or early reports leave the game unchanged and return `result: null`.
pub async fn expire(
  State(state): State<AppState>,
  jar: CookieJar,
  ApiJson(req): ApiJson<ExpireRequest>,
) -> QuizResult {
  let (jar, session_id) = client_session(jar);
  let now = Utc::now();

  let (result, view) = state.sessions.with_session(&session_id, |session| {
    let game = session.quiz.as_mut().ok_or(PracticeError::NoQuiz)?;
    let result = game.expire(req.question, now);
    Ok::<_, PracticeError>((result, game.view(now)))
  })??;
  Ok((jar, Json(QuizResponse { result, state: view })))
}

/// POST /api/quiz/restart - fresh questions and zero score
pub async fn restart(State(state): State<AppState>, jar: CookieJar) -> QuizResult {
  let (jar, session_id) = client_session(jar);
  let now = Utc::now();

  let view = state.sessions.with_session(&session_id, |session| {
    match session.quiz.as_mut() {
      Some(game) => game.restart(&state.catalog, now)?,
      None => session.quiz = Some(QuizGame::start(&state.catalog, now)?),
    }
    Ok::<_, PracticeError>(session.quiz.as_ref().map(|g| g.view(now)))
  })??;

  let view = view.ok_or(PracticeError::NoQuiz)?;
  Ok((jar, Json(QuizResponse { result: None, state: view })))
}
