use chrono::Utc;

use super::{GatewayError, ProgressGateway, ProgressMutation};
use crate::db::{self, DbPool};

/// Applies mutations to the in-memory progress store.
#[derive(Clone)]
pub struct DbGateway {
  pool: DbPool,
}

impl DbGateway {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl ProgressGateway for DbGateway {
  fn apply(&self, mutation: &ProgressMutation) -> Result<(), GatewayError> {
    let conn = db::try_lock(&self.pool).map_err(|_| GatewayError::Unavailable)?;

    match mutation {
      ProgressMutation::Vocabulary {
        user_id,
        word_id,
        learned,
      } => db::upsert_vocabulary_progress(&conn, *user_id, word_id, *learned, Utc::now())?,
      ProgressMutation::Grammar {
        user_id,
        lesson_id,
        completed,
        score,
      } => db::upsert_grammar_progress(&conn, *user_id, lesson_id, *completed, *score)?,
      ProgressMutation::Speaking {
        user_id,
        exercise_id,
        completed,
        recording_url,
      } => db::upsert_speaking_progress(
        &conn,
        *user_id,
        exercise_id,
        *completed,
        recording_url.as_deref(),
      )?,
      ProgressMutation::Writing {
        user_id,
        prompt_id,
        submission,
        feedback,
      } => db::upsert_writing_progress(
        &conn,
        *user_id,
        prompt_id,
        submission,
        feedback.as_deref(),
      )?,
      ProgressMutation::Activity { user_id } => {
        db::record_activity(&conn, *user_id, Utc::now())?;
      }
    }

    Ok(())
  }
}
