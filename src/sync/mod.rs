//! Best-effort progress sync.
//!
//! Practice transitions update in-memory session state first and then hand a
//! [`ProgressMutation`] to the outbox. The outbox worker applies it through a
//! [`ProgressGateway`]; failures are retried, then logged and dropped. Local state
//! is never rolled back.

pub mod gateway;
pub mod outbox;

use serde::Serialize;

use crate::domain::ModuleType;

pub use gateway::DbGateway;
pub use outbox::{Outbox, OutboxHandle};

/// One idempotent write against the progress store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProgressMutation {
  Vocabulary {
    user_id: i64,
    word_id: String,
    learned: bool,
  },
  Grammar {
    user_id: i64,
    lesson_id: String,
    completed: bool,
    score: Option<i64>,
  },
  Speaking {
    user_id: i64,
    exercise_id: String,
    completed: bool,
    recording_url: Option<String>,
  },
  Writing {
    user_id: i64,
    prompt_id: String,
    submission: String,
    feedback: Option<String>,
  },
  /// Counts towards the daily streak.
  Activity { user_id: i64 },
}

impl ProgressMutation {
  pub fn user_id(&self) -> i64 {
    match self {
      Self::Vocabulary { user_id, .. }
      | Self::Grammar { user_id, .. }
      | Self::Speaking { user_id, .. }
      | Self::Writing { user_id, .. }
      | Self::Activity { user_id } => *user_id,
    }
  }

  /// Module the mutation writes to; None for streak activity.
  pub fn module(&self) -> Option<ModuleType> {
    match self {
      Self::Vocabulary { .. } => Some(ModuleType::Vocabulary),
      Self::Grammar { .. } => Some(ModuleType::Grammar),
      Self::Speaking { .. } => Some(ModuleType::Speaking),
      Self::Writing { .. } => Some(ModuleType::Writing),
      Self::Activity { .. } => None,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
  #[error("progress store unavailable")]
  Unavailable,
  #[error("progress store rejected write: {0}")]
  Storage(#[from] rusqlite::Error),
  #[error("outbox closed")]
  Closed,
}

/// Destination for progress mutations.
pub trait ProgressGateway: Send + Sync + 'static {
  fn apply(&self, mutation: &ProgressMutation) -> Result<(), GatewayError>;
}
