//! Consecutive-day activity streaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStreak {
  pub user_id: i64,
  pub current_streak: i64,
  pub max_streak: i64,
  pub last_activity: DateTime<Utc>,
}

/// Response body for the streak endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakCounts {
  pub current_streak: i64,
  pub max_streak: i64,
}

impl From<&UserStreak> for StreakCounts {
  fn from(streak: &UserStreak) -> Self {
    Self {
      current_streak: streak.current_streak,
      max_streak: streak.max_streak,
    }
  }
}

impl UserStreak {
  pub fn first_activity(user_id: i64, now: DateTime<Utc>) -> Self {
    Self {
      user_id,
      current_streak: 1,
      max_streak: 1,
      last_activity: now,
    }
  }

  /// Apply one activity at `now`, comparing UTC calendar days.
  ///
  /// Same day (or a clock that went backwards) leaves the streak untouched.
  pub fn record_activity(&self, now: DateTime<Utc>) -> Self {
    let days = (now.date_naive() - self.last_activity.date_naive()).num_days();

    match days {
      d if d <= 0 => self.clone(),
      1 => {
        let current = self.current_streak + 1;
        Self {
          current_streak: current,
          max_streak: self.max_streak.max(current),
          last_activity: now,
          ..self.clone()
        }
      }
      _ => Self {
        current_streak: 1,
        last_activity: now,
        ..self.clone()
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn day(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, d, hour, 0, 0).unwrap()
  }

  #[test]
  fn test_first_activity() {
    let streak = UserStreak::first_activity(1, day(1, 9));
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.max_streak, 1);
  }

  #[test]
  fn test_same_day_unchanged() {
    let streak = UserStreak::first_activity(1, day(1, 9));
    let again = streak.record_activity(day(1, 23));
    assert_eq!(again, streak);
  }

  #[test]
  fn test_next_day_increments() {
    let streak = UserStreak::first_activity(1, day(1, 23));
    // Less than 24 hours later but on the next calendar day
    let next = streak.record_activity(day(2, 1));
    assert_eq!(next.current_streak, 2);
    assert_eq!(next.max_streak, 2);
    assert_eq!(next.last_activity, day(2, 1));
  }

  #[test]
  fn test_gap_resets_current_keeps_max() {
    let mut streak = UserStreak::first_activity(1, day(1, 9));
    streak = streak.record_activity(day(2, 9));
    streak = streak.record_activity(day(3, 9));
    assert_eq!(streak.current_streak, 3);

    let after_gap = streak.record_activity(day(6, 9));
    assert_eq!(after_gap.current_streak, 1);
    assert_eq!(after_gap.max_streak, 3);
  }

  #[test]
  fn test_max_not_raised_until_exceeded() {
    let streak = UserStreak {
      user_id: 1,
      current_streak: 1,
      max_streak: 5,
      last_activity: day(10, 8),
    };
    let next = streak.record_activity(day(11, 8));
    assert_eq!(next.current_streak, 2);
    assert_eq!(next.max_streak, 5);
  }

  #[test]
  fn test_clock_skew_is_ignored() {
    let streak = UserStreak::first_activity(1, day(5, 9));
    let earlier = streak.record_activity(day(5, 9) - Duration::days(2));
    assert_eq!(earlier, streak);
  }
}
