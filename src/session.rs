//! In-memory practice state keyed by client session id (from cookie).
//!
//! Entries expire after a configurable duration of inactivity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config;
use crate::db::{DbLockError, LogOnError};
use crate::domain::ModuleType;
use crate::practice::{PracticeDeck, QuizGame};

/// Everything one client is practising right now.
#[derive(Debug, Clone, Default)]
pub struct ClientSession {
  pub decks: HashMap<ModuleType, PracticeDeck>,
  pub quiz: Option<QuizGame>,
}

/// Session entry with last access time for expiration
struct SessionEntry {
  session: ClientSession,
  last_access: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
  inner: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SessionEntry>>, DbLockError> {
    self.inner.lock().map_err(|_| {
      tracing::error!("Session store mutex poisoned");
      DbLockError
    })
  }

  /// Run `f` against the session for `session_id`, creating it if needed.
  ///
  /// The store lock is held for the whole call, so transitions on one session are
  /// serialized.
  pub fn with_session<T>(
    &self,
    session_id: &str,
    f: impl FnOnce(&mut ClientSession) -> T,
  ) -> Result<T, DbLockError> {
    let mut sessions = self.lock()?;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions, Utc::now());
    }

    let entry = sessions
      .entry(session_id.to_string())
      .or_insert_with(|| SessionEntry {
        session: ClientSession::default(),
        last_access: Utc::now(),
      });
    entry.last_access = Utc::now();
    Ok(f(&mut entry.session))
  }

  pub fn len(&self) -> usize {
    self
      .lock()
      .map(|s| s.len())
      .log_warn_default("Session store unavailable")
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Drop sessions idle since before the expiry window
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>, now: DateTime<Utc>) {
  let expiry = now - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::practice::CompletionPolicy;
  use crate::testing::word_catalog;

  #[test]
  fn test_sessions_are_isolated() {
    let store = SessionStore::new();
    let catalog = word_catalog(5);

    store
      .with_session("a", |s| {
        s.decks.insert(
          ModuleType::Vocabulary,
          PracticeDeck::start(&catalog, ModuleType::Vocabulary, 1, None, 3, CompletionPolicy::default()),
        );
      })
      .unwrap();

    let a_has = store
      .with_session("a", |s| s.decks.contains_key(&ModuleType::Vocabulary))
      .unwrap();
    let b_has = store
      .with_session("b", |s| s.decks.contains_key(&ModuleType::Vocabulary))
      .unwrap();
    assert!(a_has);
    assert!(!b_has);
    assert_eq!(store.len(), 2);
  }

  #[test]
  fn test_cleanup_expired() {
    let now = Utc::now();
    let mut sessions = HashMap::new();
    sessions.insert(
      "old".to_string(),
      SessionEntry {
        session: ClientSession::default(),
        last_access: now - Duration::hours(config::SESSION_EXPIRY_HOURS + 1),
      },
    );
    sessions.insert(
      "fresh".to_string(),
      SessionEntry {
        session: ClientSession::default(),
        last_access: now,
      },
    );

    cleanup_expired(&mut sessions, now);
    assert_eq!(sessions.len(), 1);
    assert!(sessions.contains_key("fresh"));
  }

  #[test]
  fn test_generate_session_id() {
    let id = generate_session_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(id, generate_session_id());
  }
}
