//! Per-user progress records, one shape per module.
//!
//! Every record is keyed by `(user_id, item_id)`; storage upserts on that key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records that can report whether the item reached a positive status.
pub trait ProgressStatus {
  fn item_id(&self) -> &str;
  fn is_positive(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyProgress {
  pub id: i64,
  pub user_id: i64,
  pub word_id: String,
  pub learned: bool,
  pub last_reviewed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarProgress {
  pub id: i64,
  pub user_id: i64,
  pub lesson_id: String,
  pub completed: bool,
  pub score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingProgress {
  pub id: i64,
  pub user_id: i64,
  pub exercise_id: String,
  pub completed: bool,
  pub recording: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingProgress {
  pub id: i64,
  pub user_id: i64,
  pub prompt_id: String,
  pub submission: String,
  pub feedback: Option<String>,
}

impl ProgressStatus for VocabularyProgress {
  fn item_id(&self) -> &str {
    &self.word_id
  }

  fn is_positive(&self) -> bool {
    self.learned
  }
}

impl ProgressStatus for GrammarProgress {
  fn item_id(&self) -> &str {
    &self.lesson_id
  }

  fn is_positive(&self) -> bool {
    self.completed
  }
}

impl ProgressStatus for SpeakingProgress {
  fn item_id(&self) -> &str {
    &self.exercise_id
  }

  fn is_positive(&self) -> bool {
    self.completed
  }
}

impl ProgressStatus for WritingProgress {
  fn item_id(&self) -> &str {
    &self.prompt_id
  }

  fn is_positive(&self) -> bool {
    !self.submission.trim().is_empty()
  }
}

/// Module-level aggregate shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
  pub module: super::ModuleType,
  pub completed: i64,
  pub total: i64,
}

impl ModuleSummary {
  pub fn percentage(&self) -> i64 {
    if self.total > 0 {
      (self.completed * 100) / self.total
    } else {
      0
    }
  }
}
