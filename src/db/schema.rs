use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // One row per (user, item) in every progress table; writes upsert on that key
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS vocabulary_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      word_id TEXT NOT NULL,
      learned INTEGER NOT NULL DEFAULT 0,
      last_reviewed TEXT,
      UNIQUE (user_id, word_id)
    );

    CREATE TABLE IF NOT EXISTS grammar_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      lesson_id TEXT NOT NULL,
      completed INTEGER NOT NULL DEFAULT 0,
      score INTEGER,
      UNIQUE (user_id, lesson_id)
    );

    CREATE TABLE IF NOT EXISTS speaking_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      exercise_id TEXT NOT NULL,
      completed INTEGER NOT NULL DEFAULT 0,
      recording_url TEXT,
      UNIQUE (user_id, exercise_id)
    );

    CREATE TABLE IF NOT EXISTS writing_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id INTEGER NOT NULL,
      prompt_id TEXT NOT NULL,
      submission TEXT NOT NULL DEFAULT '',
      feedback TEXT,
      UNIQUE (user_id, prompt_id)
    );

    CREATE TABLE IF NOT EXISTS user_streaks (
      user_id INTEGER PRIMARY KEY,
      current_streak INTEGER NOT NULL,
      max_streak INTEGER NOT NULL,
      last_activity TEXT NOT NULL
    );
    "#,
  )?;

  Ok(())
}
