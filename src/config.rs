//! Application configuration constants.
//!
//! This module centralizes all configurable values. Runtime settings are loaded
//! with priority: config.toml > environment (.env) > defaults.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;
use crate::practice::CompletionPolicy;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port (override with PORT)
pub const SERVER_PORT: u16 = 3000;

// ==================== Session Configuration ====================

/// Name of the cookie carrying the practice session ID
pub const SESSION_COOKIE_NAME: &str = "lingo_session";

/// Session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// User assumed when a request does not name one (no authentication)
pub const DEFAULT_USER_ID: i64 = 1;

// ==================== Practice Configuration ====================

/// Target number of items in one practice session
pub const WORDS_PER_SESSION: usize = 10;

/// Upper bound for a client-requested session size
pub const MAX_SESSION_SIZE: usize = 50;

// ==================== Quiz Configuration ====================

/// Words per quiz game
pub const QUIZ_QUESTION_COUNT: usize = 10;

/// Seconds allowed per quiz question
pub const QUIZ_TIME_LIMIT_SECS: i64 = 10;

/// Points awarded for a correct answer
pub const QUIZ_POINTS_PER_CORRECT: u32 = 10;

/// Options shown per quiz question (one correct, the rest distractors)
pub const QUIZ_OPTION_COUNT: usize = 4;

// ==================== Outbox Configuration ====================

/// Attempts per progress mutation before it is dropped
pub const OUTBOX_MAX_ATTEMPTS: u32 = 3;

/// Linear backoff step between attempts
pub const OUTBOX_RETRY_BACKOFF_MS: u64 = 100;

// ==================== Runtime Settings ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  server: Option<ServerSection>,
  content: Option<ContentSection>,
  practice: Option<PracticeSection>,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
  port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ContentSection {
  catalog_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PracticeSection {
  session_size: Option<usize>,
  completion_policy: Option<String>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub port: u16,
  pub catalog_path: PathBuf,
  pub session_size: usize,
  pub completion_policy: CompletionPolicy,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      port: SERVER_PORT,
      catalog_path: PathBuf::from(paths::catalog_path()),
      session_size: WORDS_PER_SESSION,
      completion_policy: CompletionPolicy::default(),
    }
  }
}

impl Settings {
  /// Load settings with priority: config.toml > .env / environment > default
  pub fn load() -> Self {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string("config.toml") {
      Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
        Ok(config) => config,
        Err(e) => {
          tracing::warn!("Ignoring malformed config.toml: {}", e);
          FileConfig::default()
        }
      },
      Err(_) => FileConfig::default(),
    };

    Self::resolve(file, |key| std::env::var(key).ok())
  }

  fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();

    let port = file
      .server
      .and_then(|s| s.port)
      .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
      .unwrap_or(defaults.port);

    let catalog_path = file
      .content
      .and_then(|c| c.catalog_path)
      .or_else(|| env("CATALOG_PATH"))
      .map(PathBuf::from)
      .unwrap_or(defaults.catalog_path);

    let (file_size, file_policy) = match file.practice {
      Some(p) => (p.session_size, p.completion_policy),
      None => (None, None),
    };

    let session_size = file_size
      .or_else(|| env("SESSION_SIZE").and_then(|s| s.parse().ok()))
      .filter(|&n| n > 0)
      .map(|n| n.min(MAX_SESSION_SIZE))
      .unwrap_or(defaults.session_size);

    let completion_policy = file_policy
      .or_else(|| env("COMPLETION_POLICY"))
      .and_then(|p| CompletionPolicy::from_str(&p))
      .unwrap_or(defaults.completion_policy);

    Self {
      port,
      catalog_path,
      session_size,
      completion_policy,
    }
  }

  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", SERVER_ADDR, self.port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key: &str| map.get(key).cloned()
  }

  #[test]
  fn test_defaults() {
    let settings = Settings::resolve(FileConfig::default(), env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.session_size, WORDS_PER_SESSION);
    assert_eq!(settings.completion_policy, CompletionPolicy::ClampToSession);
  }

  #[test]
  fn test_env_overrides_defaults() {
    let settings = Settings::resolve(
      FileConfig::default(),
      env_from(&[
        ("PORT", "4100"),
        ("CATALOG_PATH", "/tmp/catalog.json"),
        ("SESSION_SIZE", "5"),
        ("COMPLETION_POLICY", "fixed"),
      ]),
    );
    assert_eq!(settings.port, 4100);
    assert_eq!(settings.catalog_path, PathBuf::from("/tmp/catalog.json"));
    assert_eq!(settings.session_size, 5);
    assert_eq!(settings.completion_policy, CompletionPolicy::FixedTarget);
    assert_eq!(settings.bind_addr(), "0.0.0.0:4100");
  }

  #[test]
  fn test_file_wins_over_env() {
    let file: FileConfig = toml::from_str(
      r#"
      [server]
      port = 8080

      [practice]
      session_size = 12
      completion_policy = "clamp"
      "#,
    )
    .unwrap();
    let settings = Settings::resolve(
      file,
      env_from(&[("PORT", "4100"), ("COMPLETION_POLICY", "fixed")]),
    );
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.session_size, 12);
    assert_eq!(settings.completion_policy, CompletionPolicy::ClampToSession);
  }

  #[test]
  fn test_invalid_values_fall_back() {
    let settings = Settings::resolve(
      FileConfig::default(),
      env_from(&[
        ("PORT", "not-a-port"),
        ("SESSION_SIZE", "0"),
        ("COMPLETION_POLICY", "sometimes"),
      ]),
    );
    assert_eq!(settings.port, SERVER_PORT);
    assert_eq!(settings.session_size, WORDS_PER_SESSION);
    assert_eq!(settings.completion_policy, CompletionPolicy::ClampToSession);
  }

  #[test]
  fn test_session_size_is_capped() {
    let settings = Settings::resolve(FileConfig::default(), env_from(&[("SESSION_SIZE", "500")]));
    assert_eq!(settings.session_size, MAX_SESSION_SIZE);
  }
}
