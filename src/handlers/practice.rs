//! Practice session endpoints.
//!
//! Decks live in the client's session (cookie). Each transition updates the deck
//! under the session lock, then hands the resulting progress writes to the outbox.

use axum::extract::{Path, State};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::extract::{ApiJson, OptionalJson};
use super::{client_session, parse_module};
use crate::config::{DEFAULT_USER_ID, MAX_SESSION_SIZE};
use crate::content::Catalog;
use crate::domain::ModuleType;
use crate::error::ApiError;
use crate::practice::{DeckOutcome, DeckView, PracticeDeck, PracticeError};
use crate::state::AppState;

type DeckResponse = Result<(CookieJar, Json<DeckView>), ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
  #[serde(default)]
  pub user_id: Option<i64>,
  #[serde(default)]
  pub topic: Option<String>,
  #[serde(default)]
  pub size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
  pub index: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
  /// Defaults to the item under the cursor
  #[serde(default)]
  pub item_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
  #[serde(default)]
  pub recording_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
  pub submission: String,
}

/// Enqueue the outcome's progress writes and log its notifications.
fn dispatch(state: &AppState, module: ModuleType, outcome: DeckOutcome) {
  for event in &outcome.events {
    tracing::info!("{} practice: {}", module, event.message());
  }
  state.outbox.enqueue_all(outcome.mutations);
}

fn new_deck(state: &AppState, module: ModuleType, req: StartRequest) -> PracticeDeck {
  let topic = req.topic.filter(|t| !t.trim().is_empty());
  let size = req
    .size
    .unwrap_or(state.settings.session_size)
    .clamp(1, MAX_SESSION_SIZE);
  PracticeDeck::start(
    &state.catalog,
    module,
    req.user_id.unwrap_or(DEFAULT_USER_ID),
    topic,
    size,
    state.settings.completion_policy,
  )
}

/// Run a transition against the client's existing deck for `module`.
fn with_deck(
  state: &AppState,
  jar: CookieJar,
  module: &str,
  f: impl FnOnce(&mut PracticeDeck, &Catalog) -> Result<DeckOutcome, PracticeError>,
) -> DeckResponse {
  let module = parse_module(module)?;
  let (jar, session_id) = client_session(jar);

  let (outcome, view) = state.sessions.with_session(&session_id, |session| {
    let deck = session
      .decks
      .get_mut(&module)
      .ok_or(PracticeError::NoSession(module))?;
    let outcome = f(deck, &state.catalog)?;
    Ok::<_, PracticeError>((outcome, deck.view(&state.catalog)))
  })??;

  dispatch(state, module, outcome);
  Ok((jar, Json(view)))
}

/// POST /api/practice/{module}/start - draw a new session, replacing any current one
pub async fn start(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  OptionalJson(req): OptionalJson<StartRequest>,
) -> DeckResponse {
  let module = parse_module(&module)?;
  let (jar, session_id) = client_session(jar);
  let deck = new_deck(&state, module, req);

  if deck.items().is_empty() {
    tracing::info!("No {} content to practise", module);
  }

  let view = state.sessions.with_session(&session_id, |session| {
    let view = deck.view(&state.catalog);
    session.decks.insert(module, deck);
    view
  })?;
  Ok((jar, Json(view)))
}

/// GET /api/practice/{module} - current deck, starting one with defaults if needed
pub async fn view(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
) -> DeckResponse {
  let module = parse_module(&module)?;
  let (jar, session_id) = client_session(jar);

  let view = state.sessions.with_session(&session_id, |session| {
    session
      .decks
      .entry(module)
      .or_insert_with(|| new_deck(&state, module, StartRequest::default()))
      .view(&state.catalog)
  })?;
  Ok((jar, Json(view)))
}

pub async fn next(State(state): State<AppState>, jar: CookieJar, Path(module): Path<String>) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    deck.next();
    Ok(DeckOutcome::default())
  })
}

pub async fn previous(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    deck.previous();
    Ok(DeckOutcome::default())
  })
}

pub async fn flip(State(state): State<AppState>, jar: CookieJar, Path(module): Path<String>) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    deck.flip();
    Ok(DeckOutcome::default())
  })
}

pub async fn jump(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  ApiJson(req): ApiJson<JumpRequest>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    deck.jump_to(req.index)?;
    Ok(DeckOutcome::default())
  })
}

pub async fn restart(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, catalog| Ok(deck.restart(catalog)))
}

/// POST /api/practice/vocabulary/toggle - flip learned status
pub async fn toggle(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  OptionalJson(req): OptionalJson<ToggleRequest>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    let (_, outcome) = match req.item_id.as_deref() {
      Some(id) => deck.toggle_learned(id)?,
      None => deck.toggle_current()?,
    };
    Ok(outcome)
  })
}

/// POST /api/practice/grammar/answer
pub async fn answer(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  ApiJson(req): ApiJson<AnswerRequest>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, catalog| {
    deck.answer_grammar(catalog, &req.answer)
  })
}

/// POST /api/practice/speaking/record
pub async fn record(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  OptionalJson(req): OptionalJson<RecordRequest>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, _| {
    deck.record_speaking(req.recording_url)
  })
}

/// POST /api/practice/writing/submit
pub async fn submit(
  State(state): State<AppState>,
  jar: CookieJar,
  Path(module): Path<String>,
  ApiJson(req): ApiJson<SubmitRequest>,
) -> DeckResponse {
  with_deck(&state, jar, &module, |deck, catalog| {
    deck.submit_writing(catalog, &req.submission)
  })
}
