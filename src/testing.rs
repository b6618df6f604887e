//! Test utilities for database and catalog setup.
//!
//! Reuses the real schema initialization so tests never carry their own copy of it.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::content::Catalog;
use crate::domain::{
  GrammarExercise, GrammarLesson, Item, ItemPayload, SpeakingExercise, Word, WritingPrompt,
};

/// Migrated in-memory progress store plus a scratch directory for catalog files.
pub struct TestEnv {
  /// Temporary directory, removed on drop
  pub temp: TempDir,
  /// Connection with the full progress schema
  pub conn: Connection,
}

impl TestEnv {
  pub fn new() -> rusqlite::Result<Self> {
    let temp =
      TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let conn = Connection::open_in_memory()?;
    crate::db::schema::run_migrations(&conn)?;

    Ok(Self { temp, conn })
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write `contents` to `name` inside the temp dir and return its path.
  pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
    let path = self.temp.path().join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
  }
}

pub fn word(id: &str, topic: Option<&str>) -> Item {
  Item::new(
    id,
    topic,
    ItemPayload::Vocabulary(Word {
      word: format!("word-{id}"),
      phonetic: "/test/".into(),
      audio_url: None,
      definition: format!("definition of {id}"),
      example: format!("An example using {id}."),
      context: String::new(),
      level: Some("beginner".into()),
    }),
  )
}

/// Catalog of `n` untagged words, ids `w1..=wn`.
pub fn word_catalog(n: usize) -> Catalog {
  let items = (1..=n).map(|i| word(&format!("w{i}"), None)).collect();
  Catalog::new(items).expect("valid word catalog")
}

/// Small catalog covering every module.
///
/// Vocabulary: w1 and w3 are Arts, w2 is Science, w4 has no topic.
/// Grammar g1 expects "went". Writing p1 takes 3 to 10 words.
pub fn sample_catalog() -> Catalog {
  let lesson = |id: &str, answer: &str| {
    Item::new(
      id,
      None,
      ItemPayload::Grammar(GrammarLesson {
        title: format!("Lesson {id}"),
        explanation: "Explanation".into(),
        examples: vec!["Example sentence.".into()],
        exercises: vec![GrammarExercise {
          question: "Yesterday I ___ to the store.".into(),
          answer: answer.into(),
          options: vec!["go".into(), "went".into(), "gone".into(), "going".into()],
        }],
      }),
    )
  };
  let phrase = |id: &str| {
    Item::new(
      id,
      None,
      ItemPayload::Speaking(SpeakingExercise {
        phrase: format!("Phrase {id}"),
        difficulty: "beginner".into(),
        tips: String::new(),
      }),
    )
  };
  let prompt = |id: &str, min_words: usize, max_words: usize| {
    Item::new(
      id,
      None,
      ItemPayload::Writing(WritingPrompt {
        title: format!("Prompt {id}"),
        description: "Describe something.".into(),
        min_words,
        max_words,
      }),
    )
  };

  Catalog::new(vec![
    word("w1", Some("Arts")),
    word("w2", Some("Science")),
    word("w3", Some("Arts")),
    word("w4", None),
    lesson("g1", "went"),
    lesson("g2", "went"),
    phrase("s1"),
    phrase("s2"),
    prompt("p1", 3, 10),
    prompt("p2", 3, 10),
  ])
  .expect("valid sample catalog")
}
