//! Timed multiple-choice vocabulary quiz.
//!
//! Each question shows a word and asks for its definition. The countdown is a
//! deadline owned by the game and tagged with a question sequence number, so a
//! timeout reported for an earlier question (or an earlier game) has no effect.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::{create_session_with_rng, PracticeError};
use crate::config;
use crate::content::Catalog;
use crate::domain::{Item, ModuleType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
  pub definition: String,
  #[serde(skip)]
  correct: bool,
}

impl QuizOption {
  pub fn is_correct(&self) -> bool {
    self.correct
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub word_id: String,
  pub word: String,
  pub options: Vec<QuizOption>,
}

impl QuizQuestion {
  pub fn correct_option(&self) -> usize {
    self.options.iter().position(|o| o.correct).unwrap_or(0)
  }
}

/// Result of one question, answered or timed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
  pub question: u64,
  pub chosen: Option<usize>,
  pub correct: bool,
  pub timed_out: bool,
  pub correct_option: usize,
  pub points: u32,
  pub score: u32,
  pub finished: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
  /// Sequence number the client echoes back when its countdown fires.
  pub question: u64,
  pub index: usize,
  pub total: usize,
  pub word: Option<String>,
  pub options: Vec<QuizOption>,
  pub score: u32,
  pub max_score: u32,
  pub deadline: DateTime<Utc>,
  pub remaining_secs: i64,
  pub finished: bool,
  pub last_answer: Option<QuizAnswer>,
}

/// Build the options for `word`: its definition at a random position plus up to
/// `QUIZ_OPTION_COUNT - 1` definitions of other words.
fn generate_options<R: Rng + ?Sized>(catalog: &Catalog, word: &Item, rng: &mut R) -> Vec<QuizOption> {
  let correct = word.as_word().map(|w| w.definition.clone()).unwrap_or_default();

  let mut distractors: Vec<&str> = catalog
    .items(ModuleType::Vocabulary)
    .iter()
    .filter(|other| other.id != word.id)
    .filter_map(|other| other.as_word())
    .map(|w| w.definition.as_str())
    .filter(|definition| *definition != correct)
    .collect();
  distractors.shuffle(rng);
  distractors.truncate(config::QUIZ_OPTION_COUNT - 1);

  let mut options: Vec<QuizOption> = distractors
    .into_iter()
    .map(|definition| QuizOption {
      definition: definition.to_string(),
      correct: false,
    })
    .collect();

  let position = rng.random_range(0..=options.len());
  options.insert(
    position,
    QuizOption {
      definition: correct,
      correct: true,
    },
  );
  options
}

fn build_questions<R: Rng + ?Sized>(
  catalog: &Catalog,
  count: usize,
  rng: &mut R,
) -> Result<Vec<QuizQuestion>, PracticeError> {
  let ids = create_session_with_rng(catalog, ModuleType::Vocabulary, count, None, rng);
  if ids.is_empty() {
    return Err(PracticeError::NotEnoughWords {
      needed: 1,
      available: 0,
    });
  }

  let questions = ids
    .iter()
    .filter_map(|id| catalog.get(ModuleType::Vocabulary, id))
    .filter_map(|item| {
      let word = item.as_word()?;
      Some(QuizQuestion {
        word_id: item.id.clone(),
        word: word.word.clone(),
        options: generate_options(catalog, item, rng),
      })
    })
    .collect();
  Ok(questions)
}

#[derive(Debug, Clone)]
pub struct QuizGame {
  questions: Vec<QuizQuestion>,
  current: usize,
  seq: u64,
  score: u32,
  deadline: DateTime<Utc>,
  time_limit: Duration,
  finished: bool,
  last_answer: Option<QuizAnswer>,
}

impl QuizGame {
  pub fn start(catalog: &Catalog, now: DateTime<Utc>) -> Result<Self, PracticeError> {
    let mut rng = rand::rng();
    Self::start_with_rng(
      catalog,
      config::QUIZ_QUESTION_COUNT,
      Duration::seconds(config::QUIZ_TIME_LIMIT_SECS),
      now,
      &mut rng,
    )
  }

  pub fn start_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    count: usize,
    time_limit: Duration,
    now: DateTime<Utc>,
    rng: &mut R,
  ) -> Result<Self, PracticeError> {
    let questions = build_questions(catalog, count, rng)?;
    Ok(Self {
      questions,
      current: 0,
      seq: 1,
      score: 0,
      deadline: now + time_limit,
      time_limit,
      finished: false,
      last_answer: None,
    })
  }

  pub fn question_seq(&self) -> u64 {
    self.seq
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn max_score(&self) -> u32 {
    self.questions.len() as u32 * config::QUIZ_POINTS_PER_CORRECT
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  pub fn current_question(&self) -> Option<&QuizQuestion> {
    if self.finished {
      None
    } else {
      self.questions.get(self.current)
    }
  }

  /// Answer the current question. `question`, when given, must match the current
  /// sequence number; a mismatch means the question was already answered or timed out.
  pub fn answer(
    &mut self,
    option: usize,
    question: Option<u64>,
    now: DateTime<Utc>,
  ) -> Result<QuizAnswer, PracticeError> {
    if self.finished {
      return Err(PracticeError::QuizFinished);
    }
    if question.is_some_and(|q| q != self.seq) {
      return Err(PracticeError::AlreadyAnswered);
    }
    let current = self.current_question().ok_or(PracticeError::QuizFinished)?;
    if option >= current.options.len() {
      return Err(PracticeError::InvalidOption {
        option,
        count: current.options.len(),
      });
    }

    // Past the deadline the answer still closes the question, but scores nothing
    let timed_out = now > self.deadline;
    let correct = !timed_out && current.options[option].correct;
    Ok(self.close_question(Some(option), correct, timed_out, now))
  }

  /// The client's countdown for `question` fired. Returns None when the report is
  /// stale or early and the game is unchanged.
  pub fn expire(&mut self, question: u64, now: DateTime<Utc>) -> Option<QuizAnswer> {
    if self.finished || question != self.seq || now < self.deadline {
      tracing::debug!("Ignoring quiz timeout for question {} (current {})", question, self.seq);
      return None;
    }
    Some(self.close_question(None, false, true, now))
  }

  pub fn restart(&mut self, catalog: &Catalog, now: DateTime<Utc>) -> Result<(), PracticeError> {
    let mut rng = rand::rng();
    self.restart_with_rng(catalog, now, &mut rng)
  }

  /// New questions and a zero score. The sequence keeps counting so timeouts from the
  /// previous game stay stale.
  pub fn restart_with_rng<R: Rng + ?Sized>(
    &mut self,
    catalog: &Catalog,
    now: DateTime<Utc>,
    rng: &mut R,
  ) -> Result<(), PracticeError> {
    let count = self.questions.len().max(1);
    self.questions = build_questions(catalog, count, rng)?;
    self.current = 0;
    self.seq += 1;
    self.score = 0;
    self.deadline = now + self.time_limit;
    self.finished = false;
    self.last_answer = None;
    Ok(())
  }

  pub fn view(&self, now: DateTime<Utc>) -> QuizView {
    let current = self.current_question();
    QuizView {
      question: self.seq,
      index: self.current.min(self.questions.len()),
      total: self.questions.len(),
      word: current.map(|q| q.word.clone()),
      options: current.map(|q| q.options.clone()).unwrap_or_default(),
      score: self.score,
      max_score: self.max_score(),
      deadline: self.deadline,
      remaining_secs: if self.finished {
        0
      } else {
        (self.deadline - now).num_seconds().max(0)
      },
      finished: self.finished,
      last_answer: self.last_answer,
    }
  }

  fn close_question(
    &mut self,
    chosen: Option<usize>,
    correct: bool,
    timed_out: bool,
    now: DateTime<Utc>,
  ) -> QuizAnswer {
    let correct_option = self
      .questions
      .get(self.current)
      .map(QuizQuestion::correct_option)
      .unwrap_or(0);
    let points = if correct {
      config::QUIZ_POINTS_PER_CORRECT
    } else {
      0
    };
    self.score += points;

    let answered = self.seq;
    self.current += 1;
    self.seq += 1;
    self.deadline = now + self.time_limit;
    self.finished = self.current >= self.questions.len();

    let answer = QuizAnswer {
      question: answered,
      chosen,
      correct,
      timed_out,
      correct_option,
      points,
      score: self.score,
      finished: self.finished,
    };
    self.last_answer = Some(answer);
    answer
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::word_catalog;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use std::collections::HashSet;

  fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
      .unwrap()
      .with_timezone(&Utc)
  }

  fn game(words: usize, count: usize) -> QuizGame {
    let mut rng = StdRng::seed_from_u64(3);
    QuizGame::start_with_rng(&word_catalog(words), count, Duration::seconds(10), t0(), &mut rng)
      .unwrap()
  }

  #[test]
  fn test_questions_have_one_correct_option() {
    let g = game(20, 10);
    assert_eq!(g.questions.len(), 10);
    for q in &g.questions {
      assert_eq!(q.options.len(), config::QUIZ_OPTION_COUNT);
      assert_eq!(q.options.iter().filter(|o| o.is_correct()).count(), 1);
      let distinct: HashSet<&str> = q.options.iter().map(|o| o.definition.as_str()).collect();
      assert_eq!(distinct.len(), q.options.len());
      assert_eq!(
        q.options[q.correct_option()].definition,
        format!("definition of {}", q.word_id)
      );
    }
  }

  #[test]
  fn test_tiny_catalog_gets_fewer_options() {
    let g = game(2, 10);
    assert_eq!(g.questions.len(), 2);
    assert!(g.questions.iter().all(|q| q.options.len() == 2));
  }

  #[test]
  fn test_empty_catalog_cannot_start() {
    let mut rng = StdRng::seed_from_u64(3);
    let err = QuizGame::start_with_rng(&Catalog::default(), 10, Duration::seconds(10), t0(), &mut rng)
      .unwrap_err();
    assert!(matches!(err, PracticeError::NotEnoughWords { .. }));
  }

  #[test]
  fn test_correct_answer_scores_and_advances() {
    let mut g = game(20, 3);
    let right = g.current_question().unwrap().correct_option();
    let answer = g.answer(right, Some(1), t0()).unwrap();
    assert!(answer.correct);
    assert_eq!(answer.points, 10);
    assert_eq!(g.score(), 10);
    assert_eq!(g.question_seq(), 2);

    // Same question again is rejected
    assert_eq!(
      g.answer(0, Some(1), t0()).unwrap_err(),
      PracticeError::AlreadyAnswered
    );
  }

  #[test]
  fn test_wrong_and_late_answers_score_nothing() {
    let mut g = game(20, 3);
    let q = g.current_question().unwrap();
    let wrong = (q.correct_option() + 1) % q.options.len();
    assert_eq!(g.answer(wrong, None, t0()).unwrap().points, 0);

    let right = g.current_question().unwrap().correct_option();
    let late = g.answer(right, None, t0() + Duration::seconds(11)).unwrap();
    assert!(late.timed_out);
    assert!(!late.correct);
    assert_eq!(g.score(), 0);
  }

  #[test]
  fn test_invalid_option() {
    let mut g = game(20, 3);
    assert_eq!(
      g.answer(9, None, t0()).unwrap_err(),
      PracticeError::InvalidOption { option: 9, count: 4 }
    );
    assert_eq!(g.question_seq(), 1);
  }

  #[test]
  fn test_stale_and_early_expiry_ignored() {
    let mut g = game(20, 3);
    assert!(g.expire(1, t0() + Duration::seconds(5)).is_none());

    let right = g.current_question().unwrap().correct_option();
    g.answer(right, None, t0() + Duration::seconds(2)).unwrap();

    // Countdown for question 1 fires after it was answered
    assert!(g.expire(1, t0() + Duration::seconds(10)).is_none());
    assert_eq!(g.question_seq(), 2);

    // Question 2's deadline is 10s after the answer
    let expired = g.expire(2, t0() + Duration::seconds(12)).unwrap();
    assert!(expired.timed_out);
    assert_eq!(expired.points, 0);
    assert_eq!(g.question_seq(), 3);
  }

  #[test]
  fn test_game_finishes_and_score_is_bounded() {
    let mut g = game(20, 4);
    let mut now = t0();
    while !g.is_finished() {
      let right = g.current_question().unwrap().correct_option();
      g.answer(right, None, now).unwrap();
      now += Duration::seconds(1);
    }
    assert_eq!(g.score(), g.max_score());
    assert_eq!(g.max_score(), 40);
    assert_eq!(g.answer(0, None, now).unwrap_err(), PracticeError::QuizFinished);
    assert!(g.expire(g.question_seq(), now + Duration::seconds(60)).is_none());

    let view = g.view(now);
    assert!(view.finished);
    assert!(view.word.is_none());
    assert_eq!(view.remaining_secs, 0);
  }

  #[test]
  fn test_restart_resets_score_and_invalidates_old_timers() {
    let mut g = game(20, 3);
    let right = g.current_question().unwrap().correct_option();
    g.answer(right, None, t0()).unwrap();
    let stale = g.question_seq();

    let mut rng = StdRng::seed_from_u64(11);
    g.restart_with_rng(&word_catalog(20), t0(), &mut rng).unwrap();
    assert_eq!(g.score(), 0);
    assert!(!g.is_finished());
    assert_eq!(g.questions.len(), 3);
    assert!(g.expire(stale, t0() + Duration::seconds(30)).is_none());
    assert!(g.view(t0()).last_answer.is_none());
  }

  #[test]
  fn test_view_hides_correctness() {
    let g = game(20, 3);
    let json = serde_json::to_value(g.view(t0())).unwrap();
    assert_eq!(json["remainingSecs"], 10);
    assert!(json["options"][0].get("correct").is_none());
    assert!(json["options"][0].get("definition").is_some());
  }
}
