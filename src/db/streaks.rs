//! Activity streak storage

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Error, OptionalExtension, Result};

use crate::domain::UserStreak;

pub fn get_user_streak(conn: &Connection, user_id: i64) -> Result<Option<UserStreak>> {
  conn
    .query_row(
      "SELECT user_id, current_streak, max_streak, last_activity
       FROM user_streaks WHERE user_id = ?1",
      params![user_id],
      |row| {
        let last: String = row.get(3)?;
        Ok(UserStreak {
          user_id: row.get(0)?,
          current_streak: row.get(1)?,
          max_streak: row.get(2)?,
          last_activity: DateTime::parse_from_rfc3339(&last)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
        })
      },
    )
    .optional()
}

fn save_user_streak(conn: &Connection, streak: &UserStreak) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO user_streaks (user_id, current_streak, max_streak, last_activity)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id) DO UPDATE SET
      current_streak = excluded.current_streak,
      max_streak = excluded.max_streak,
      last_activity = excluded.last_activity
    "#,
    params![
      streak.user_id,
      streak.current_streak,
      streak.max_streak,
      streak.last_activity.to_rfc3339()
    ],
  )?;
  Ok(())
}

/// Record one activity for `user_id` at `now` and return the updated streak.
pub fn record_activity(conn: &Connection, user_id: i64, now: DateTime<Utc>) -> Result<UserStreak> {
  let updated = match get_user_streak(conn, user_id)? {
    Some(existing) => existing.record_activity(now),
    None => UserStreak::first_activity(user_id, now),
  };
  save_user_streak(conn, &updated)?;
  Ok(updated)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use chrono::TimeZone;

  fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
  }

  #[test]
  fn test_missing_streak() {
    let env = TestEnv::new().unwrap();
    assert_eq!(get_user_streak(&env.conn, 1).unwrap(), None);
  }

  #[test]
  fn test_streak_sequence() {
    let env = TestEnv::new().unwrap();
    let conn = &env.conn;

    let s = record_activity(conn, 1, at(1)).unwrap();
    assert_eq!((s.current_streak, s.max_streak), (1, 1));

    let s = record_activity(conn, 1, at(1)).unwrap();
    assert_eq!((s.current_streak, s.max_streak), (1, 1));

    let s = record_activity(conn, 1, at(2)).unwrap();
    assert_eq!((s.current_streak, s.max_streak), (2, 2));

    let s = record_activity(conn, 1, at(5)).unwrap();
    assert_eq!((s.current_streak, s.max_streak), (1, 2));

    let stored = get_user_streak(conn, 1).unwrap().unwrap();
    assert_eq!(stored.last_activity, at(5));
  }

  #[test]
  fn test_streaks_are_per_user() {
    let env = TestEnv::new().unwrap();
    record_activity(&env.conn, 1, at(1)).unwrap();
    record_activity(&env.conn, 1, at(2)).unwrap();
    let other = record_activity(&env.conn, 2, at(2)).unwrap();
    assert_eq!(other.current_streak, 1);
  }

  #[test]
  fn test_corrupt_timestamp_is_an_error() {
    let env = TestEnv::new().unwrap();
    env
      .conn
      .execute(
        "INSERT INTO user_streaks (user_id, current_streak, max_streak, last_activity)
         VALUES (1, 4, 6, 'yesterday-ish')",
        [],
      )
      .unwrap();

    assert!(matches!(
      get_user_streak(&env.conn, 1),
      Err(Error::FromSqlConversionFailure(3, Type::Text, _))
    ));
    assert!(record_activity(&env.conn, 1, at(2)).is_err());

    let (current, max): (i64, i64) = env
      .conn
      .query_row(
        "SELECT current_streak, max_streak FROM user_streaks WHERE user_id = 1",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
      )
      .unwrap();
    assert_eq!((current, max), (4, 6));
  }
}
