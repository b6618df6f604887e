//! Session-scoped progress: which session items reached a positive status.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How the completion target relates to the configured session size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
  /// Target is `min(session size, session length)`; small catalogs can still complete.
  #[default]
  ClampToSession,
  /// Target is always the configured session size, even when fewer items exist.
  FixedTarget,
}

impl CompletionPolicy {
  pub fn from_str(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "clamp" | "clamp_to_session" => Some(Self::ClampToSession),
      "fixed" | "fixed_target" => Some(Self::FixedTarget),
      _ => None,
    }
  }

  pub fn target(&self, session_size: usize, session_len: usize) -> usize {
    match self {
      Self::ClampToSession => session_size.min(session_len),
      Self::FixedTarget => session_size,
    }
  }
}

/// True iff the session is non-empty, every id in it is positive, and the positive
/// count equals `target`.
pub fn is_session_complete(session: &[String], positive: &HashSet<String>, target: usize) -> bool {
  if session.is_empty() {
    return false;
  }
  let reached = session.iter().filter(|id| positive.contains(*id)).count();
  reached == session.len() && reached == target
}

/// Positive-status set for the items of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTracker {
  positive: HashSet<String>,
  target: usize,
}

impl SessionTracker {
  pub fn new(target: usize) -> Self {
    Self {
      positive: HashSet::new(),
      target,
    }
  }

  pub fn target(&self) -> usize {
    self.target
  }

  pub fn count(&self) -> usize {
    self.positive.len()
  }

  pub fn contains(&self, id: &str) -> bool {
    self.positive.contains(id)
  }

  pub fn positive(&self) -> &HashSet<String> {
    &self.positive
  }

  /// Flip the status of `id`; returns the new status.
  pub fn toggle(&mut self, id: &str) -> bool {
    if self.positive.remove(id) {
      false
    } else {
      self.positive.insert(id.to_string());
      true
    }
  }

  /// Set positive; returns false when it already was.
  pub fn mark(&mut self, id: &str) -> bool {
    self.positive.insert(id.to_string())
  }

  pub fn unmark(&mut self, id: &str) -> bool {
    self.positive.remove(id)
  }

  pub fn is_complete(&self, session: &[String]) -> bool {
    is_session_complete(session, &self.positive, self.target)
  }

  /// Percent of the session that is positive, rounded down.
  pub fn percent(&self, session_len: usize) -> u32 {
    if session_len == 0 {
      0
    } else {
      ((self.count().min(session_len) * 100) / session_len) as u32
    }
  }

  pub fn reset(&mut self, target: usize) {
    self.positive.clear();
    self.target = target;
  }
}
