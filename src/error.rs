//! HTTP error type. Every failure renders as `{success: false, error, code}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DbLockError;
use crate::practice::PracticeError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub error: String,
  pub code: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{}", .0.body_text())]
  InvalidBody(#[from] JsonRejection),

  #[error("{}", .0.body_text())]
  InvalidQuery(#[from] QueryRejection),

  #[error("Unknown module '{0}'")]
  UnknownModule(String),

  #[error(transparent)]
  Practice(#[from] PracticeError),

  #[error(transparent)]
  Storage(#[from] rusqlite::Error),

  #[error(transparent)]
  Unavailable(#[from] DbLockError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::InvalidBody(r) => r.status(),
      Self::InvalidQuery(r) => r.status(),
      Self::UnknownModule(_) => StatusCode::NOT_FOUND,
      Self::Practice(e) => match e {
        PracticeError::NoSession(_) | PracticeError::NoQuiz => StatusCode::NOT_FOUND,
        PracticeError::AlreadyAnswered | PracticeError::QuizFinished => StatusCode::CONFLICT,
        PracticeError::SubmissionLength { .. } | PracticeError::InvalidOption { .. } => {
          StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::BAD_REQUEST,
      },
      Self::Storage(_) | Self::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::BadRequest(_) => "BAD_REQUEST",
      Self::InvalidBody(_) => "INVALID_BODY",
      Self::InvalidQuery(_) => "INVALID_QUERY",
      Self::UnknownModule(_) => "UNKNOWN_MODULE",
      Self::Practice(e) => match e {
        PracticeError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
        PracticeError::EmptySession => "EMPTY_SESSION",
        PracticeError::NoSession(_) => "NO_SESSION",
        PracticeError::WrongModule { .. } => "WRONG_MODULE",
        PracticeError::UnknownItem(_) => "UNKNOWN_ITEM",
        PracticeError::SubmissionLength { .. } => "SUBMISSION_LENGTH",
        PracticeError::NoQuiz => "NO_QUIZ",
        PracticeError::NotEnoughWords { .. } => "NOT_ENOUGH_WORDS",
        PracticeError::AlreadyAnswered => "ALREADY_ANSWERED",
        PracticeError::QuizFinished => "QUIZ_FINISHED",
        PracticeError::InvalidOption { .. } => "INVALID_OPTION",
      },
      Self::Storage(_) => "STORAGE_ERROR",
      Self::Unavailable(_) => "UNAVAILABLE",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let error = if status.is_server_error() {
      tracing::error!("Request failed: {}", self);
      "Internal server error".to_string()
    } else {
      self.to_string()
    };

    let body = ErrorResponse {
      success: false,
      error,
      code: self.code(),
    };
    (status, Json(body)).into_response()
  }
}
