//! Per-module progress records keyed by (user, item).
//!
//! Every write is an upsert: repeating a call with the same key overwrites the
//! existing row instead of adding another one.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result, Row};
use std::collections::HashSet;

use crate::domain::{
  GrammarProgress, ModuleType, ProgressStatus, SpeakingProgress, VocabularyProgress,
  WritingProgress,
};

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<Utc>> {
  raw.and_then(|s| {
    DateTime::parse_from_rfc3339(&s)
      .map(|dt| dt.with_timezone(&Utc))
      .ok()
  })
}

// ==================== Vocabulary ====================

pub fn upsert_vocabulary_progress(
  conn: &Connection,
  user_id: i64,
  word_id: &str,
  learned: bool,
  now: DateTime<Utc>,
) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO vocabulary_progress (user_id, word_id, learned, last_reviewed)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id, word_id) DO UPDATE SET
      learned = excluded.learned,
      last_reviewed = excluded.last_reviewed
    "#,
    params![user_id, word_id, learned, now.to_rfc3339()],
  )?;
  Ok(())
}

fn vocabulary_from_row(row: &Row) -> Result<VocabularyProgress> {
  Ok(VocabularyProgress {
    id: row.get(0)?,
    user_id: row.get(1)?,
    word_id: row.get(2)?,
    learned: row.get(3)?,
    last_reviewed: parse_timestamp(row.get(4)?),
  })
}

pub fn get_vocabulary_progress(conn: &Connection, user_id: i64) -> Result<Vec<VocabularyProgress>> {
  let mut stmt = conn.prepare(
    "SELECT id, user_id, word_id, learned, last_reviewed
     FROM vocabulary_progress WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], vocabulary_from_row)?
    .collect::<Result<Vec<_>>>()?;
  Ok(rows)
}

// ==================== Grammar ====================

pub fn upsert_grammar_progress(
  conn: &Connection,
  user_id: i64,
  lesson_id: &str,
  completed: bool,
  score: Option<i64>,
) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO grammar_progress (user_id, lesson_id, completed, score)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id, lesson_id) DO UPDATE SET
      completed = excluded.completed,
      score = excluded.score
    "#,
    params![user_id, lesson_id, completed, score],
  )?;
  Ok(())
}

pub fn get_grammar_progress(conn: &Connection, user_id: i64) -> Result<Vec<GrammarProgress>> {
  let mut stmt = conn.prepare(
    "SELECT id, user_id, lesson_id, completed, score
     FROM grammar_progress WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], |row| {
      Ok(GrammarProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        lesson_id: row.get(2)?,
        completed: row.get(3)?,
        score: row.get(4)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(rows)
}

// ==================== Speaking ====================

pub fn upsert_speaking_progress(
  conn: &Connection,
  user_id: i64,
  exercise_id: &str,
  completed: bool,
  recording_url: Option<&str>,
) -> Result<()> {
  // An empty URL is stored as no recording
  let recording_url = recording_url.filter(|url| !url.is_empty());
  conn.execute(
    r#"
    INSERT INTO speaking_progress (user_id, exercise_id, completed, recording_url)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id, exercise_id) DO UPDATE SET
      completed = excluded.completed,
      recording_url = excluded.recording_url
    "#,
    params![user_id, exercise_id, completed, recording_url],
  )?;
  Ok(())
}

pub fn get_speaking_progress(conn: &Connection, user_id: i64) -> Result<Vec<SpeakingProgress>> {
  let mut stmt = conn.prepare(
    "SELECT id, user_id, exercise_id, completed, recording_url
     FROM speaking_progress WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], |row| {
      Ok(SpeakingProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        exercise_id: row.get(2)?,
        completed: row.get(3)?,
        recording: row.get(4)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(rows)
}

// ==================== Writing ====================

pub fn upsert_writing_progress(
  conn: &Connection,
  user_id: i64,
  prompt_id: &str,
  submission: &str,
  feedback: Option<&str>,
) -> Result<()> {
  let feedback = feedback.filter(|f| !f.is_empty());
  conn.execute(
    r#"
    INSERT INTO writing_progress (user_id, prompt_id, submission, feedback)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id, prompt_id) DO UPDATE SET
      submission = excluded.submission,
      feedback = excluded.feedback
    "#,
    params![user_id, prompt_id, submission, feedback],
  )?;
  Ok(())
}

pub fn get_writing_progress(conn: &Connection, user_id: i64) -> Result<Vec<WritingProgress>> {
  let mut stmt = conn.prepare(
    "SELECT id, user_id, prompt_id, submission, feedback
     FROM writing_progress WHERE user_id = ?1 ORDER BY id",
  )?;
  let rows = stmt
    .query_map(params![user_id], |row| {
      Ok(WritingProgress {
        id: row.get(0)?,
        user_id: row.get(1)?,
        prompt_id: row.get(2)?,
        submission: row.get(3)?,
        feedback: row.get(4)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(rows)
}

// ==================== Cross-module ====================

fn positive_ids<R: ProgressStatus>(records: Vec<R>) -> HashSet<String> {
  records
    .iter()
    .filter(|r| r.is_positive())
    .map(|r| r.item_id().to_string())
    .collect()
}

/// Ids of the items a user currently has in positive status for `module`.
pub fn get_positive_item_ids(
  conn: &Connection,
  module: ModuleType,
  user_id: i64,
) -> Result<HashSet<String>> {
  Ok(match module {
    ModuleType::Vocabulary => positive_ids(get_vocabulary_progress(conn, user_id)?),
    ModuleType::Grammar => positive_ids(get_grammar_progress(conn, user_id)?),
    ModuleType::Speaking => positive_ids(get_speaking_progress(conn, user_id)?),
    ModuleType::Writing => positive_ids(get_writing_progress(conn, user_id)?),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use chrono::Duration;

  #[test]
  fn test_vocabulary_upsert_overwrites() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    let first = Utc::now() - Duration::hours(1);
    let second = Utc::now();

    upsert_vocabulary_progress(conn, 1, "w1", true, first).unwrap();
    upsert_vocabulary_progress(conn, 1, "w1", false, second).unwrap();
    upsert_vocabulary_progress(conn, 1, "w1", false, second).unwrap();

    let rows = get_vocabulary_progress(conn, 1).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].learned);
    assert_eq!(
      rows[0].last_reviewed.map(|t| t.timestamp()),
      Some(second.timestamp())
    );
  }

  #[test]
  fn test_records_are_scoped_by_user() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    upsert_vocabulary_progress(conn, 1, "w1", true, Utc::now()).unwrap();
    upsert_vocabulary_progress(conn, 2, "w1", true, Utc::now()).unwrap();
    upsert_vocabulary_progress(conn, 2, "w2", true, Utc::now()).unwrap();

    assert_eq!(get_vocabulary_progress(conn, 1).unwrap().len(), 1);
    assert_eq!(get_vocabulary_progress(conn, 2).unwrap().len(), 2);
    assert!(get_vocabulary_progress(conn, 3).unwrap().is_empty());
  }

  #[test]
  fn test_grammar_upsert() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    upsert_grammar_progress(conn, 1, "g1", true, Some(0)).unwrap();
    upsert_grammar_progress(conn, 1, "g1", true, Some(1)).unwrap();

    let rows = get_grammar_progress(conn, 1).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].score, Some(1));
    assert!(rows[0].completed);
  }

  #[test]
  fn test_speaking_empty_url_is_none() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    upsert_speaking_progress(conn, 1, "s1", true, Some("")).unwrap();
    let rows = get_speaking_progress(conn, 1).unwrap();
    assert_eq!(rows[0].recording, None);

    upsert_speaking_progress(conn, 1, "s1", true, Some("blob:rec-1")).unwrap();
    let rows = get_speaking_progress(conn, 1).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].recording.as_deref(), Some("blob:rec-1"));
  }

  #[test]
  fn test_writing_upsert() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    upsert_writing_progress(conn, 1, "p1", "first draft", None).unwrap();
    upsert_writing_progress(conn, 1, "p1", "second draft", Some("Good tense usage")).unwrap();

    let rows = get_writing_progress(conn, 1).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].submission, "second draft");
    assert_eq!(rows[0].feedback.as_deref(), Some("Good tense usage"));
  }

  #[test]
  fn test_positive_ids_reflect_current_state() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;
    upsert_vocabulary_progress(conn, 1, "w1", true, Utc::now()).unwrap();
    upsert_vocabulary_progress(conn, 1, "w2", true, Utc::now()).unwrap();
    upsert_vocabulary_progress(conn, 1, "w2", false, Utc::now()).unwrap();
    upsert_writing_progress(conn, 1, "p1", "  ", None).unwrap();
    upsert_writing_progress(conn, 1, "p2", "done", None).unwrap();

    let vocab = get_positive_item_ids(conn, ModuleType::Vocabulary, 1).unwrap();
    assert_eq!(vocab, HashSet::from(["w1".to_string()]));

    let writing = get_positive_item_ids(conn, ModuleType::Writing, 1).unwrap();
    assert_eq!(writing, HashSet::from(["p2".to_string()]));

    assert!(get_positive_item_ids(conn, ModuleType::Grammar, 1).unwrap().is_empty());
  }
}
