//! One client's practice session for one module.
//!
//! A deck ties together the selected item sequence, the cursor, and the
//! session-scoped positive set. Transitions are synchronous and update local state
//! first; the progress writes they imply are returned as [`ProgressMutation`]s for
//! the caller to hand to the outbox.

use rand::Rng;
use serde::Serialize;

use super::{create_session_with_rng, CompletionPolicy, Cursor, PracticeError, SessionTracker};
use crate::content::Catalog;
use crate::domain::{Item, ModuleType, WritingPrompt};
use crate::sync::ProgressMutation;

/// Notification produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DeckEvent {
  #[serde(rename_all = "camelCase")]
  MarkedLearned { item_id: String },
  #[serde(rename_all = "camelCase")]
  Unmarked { item_id: String },
  #[serde(rename_all = "camelCase")]
  LessonChecked {
    item_id: String,
    correct: bool,
    correct_answer: String,
  },
  #[serde(rename_all = "camelCase")]
  Recorded { item_id: String },
  #[serde(rename_all = "camelCase")]
  Submitted { item_id: String, word_count: usize },
  /// Every session item is positive. Emitted once per completion.
  SessionComplete { learned: usize },
  Restarted { round: u32 },
}

impl DeckEvent {
  pub fn message(&self) -> String {
    match self {
      Self::MarkedLearned { .. } => "Word marked as learned!".to_string(),
      Self::Unmarked { .. } => "Word unmarked".to_string(),
      Self::LessonChecked {
        correct: true, ..
      } => "Correct! Well done!".to_string(),
      Self::LessonChecked { correct_answer, .. } => {
        format!("Incorrect. The correct answer is: {correct_answer}")
      }
      Self::Recorded { .. } => "Recording saved".to_string(),
      Self::Submitted { word_count, .. } => format!("Submitted {word_count} words"),
      Self::SessionComplete { learned } => {
        format!("Congratulations! You completed all {learned} items in this session")
      }
      Self::Restarted { round } => format!("Round {round} started"),
    }
  }
}

/// Side effects of a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckOutcome {
  pub mutations: Vec<ProgressMutation>,
  pub events: Vec<DeckEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
  pub learned: bool,
  pub total_learned_in_session: usize,
}

/// Serializable snapshot of a deck for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckView {
  pub module: ModuleType,
  pub user_id: i64,
  pub topic: Option<String>,
  pub items: Vec<String>,
  pub index: usize,
  pub revealed: bool,
  pub current: Option<Item>,
  pub learned_ids: Vec<String>,
  pub learned_count: usize,
  pub target: usize,
  pub progress_percent: u32,
  pub complete: bool,
  pub round: u32,
  pub notifications: Vec<DeckEvent>,
}

#[derive(Debug, Clone)]
pub struct PracticeDeck {
  module: ModuleType,
  user_id: i64,
  topic: Option<String>,
  size: usize,
  policy: CompletionPolicy,
  items: Vec<String>,
  cursor: Cursor,
  tracker: SessionTracker,
  round: u32,
  celebrated: bool,
  notifications: Vec<DeckEvent>,
}

impl PracticeDeck {
  pub fn start(
    catalog: &Catalog,
    module: ModuleType,
    user_id: i64,
    topic: Option<String>,
    size: usize,
    policy: CompletionPolicy,
  ) -> Self {
    let mut rng = rand::rng();
    Self::start_with_rng(catalog, module, user_id, topic, size, policy, &mut rng)
  }

  pub fn start_with_rng<R: Rng + ?Sized>(
    catalog: &Catalog,
    module: ModuleType,
    user_id: i64,
    topic: Option<String>,
    size: usize,
    policy: CompletionPolicy,
    rng: &mut R,
  ) -> Self {
    let items = create_session_with_rng(catalog, module, size, topic.as_deref(), rng);
    let target = policy.target(size, items.len());

    Self {
      module,
      user_id,
      topic,
      size,
      policy,
      cursor: Cursor::new(items.len()),
      tracker: SessionTracker::new(target),
      items,
      round: 1,
      celebrated: false,
      notifications: Vec::new(),
    }
  }

  pub fn module(&self) -> ModuleType {
    self.module
  }

  pub fn user_id(&self) -> i64 {
    self.user_id
  }

  pub fn items(&self) -> &[String] {
    &self.items
  }

  pub fn cursor(&self) -> Cursor {
    self.cursor
  }

  pub fn tracker(&self) -> &SessionTracker {
    &self.tracker
  }

  pub fn round(&self) -> u32 {
    self.round
  }

  pub fn current_id(&self) -> Option<&str> {
    self.items.get(self.cursor.index()).map(String::as_str)
  }

  pub fn is_complete(&self) -> bool {
    self.tracker.is_complete(&self.items)
  }

  // ==================== Navigation ====================

  pub fn next(&mut self) {
    self.cursor.next();
    self.notifications.clear();
  }

  pub fn previous(&mut self) {
    self.cursor.previous();
    self.notifications.clear();
  }

  pub fn flip(&mut self) {
    self.cursor.flip();
    self.notifications.clear();
  }

  pub fn jump_to(&mut self, index: usize) -> Result<(), PracticeError> {
    self.cursor.jump_to(index)?;
    self.notifications.clear();
    Ok(())
  }

  // ==================== Module actions ====================

  /// Flip the learned status of a vocabulary item in this session.
  pub fn toggle_learned(&mut self, item_id: &str) -> Result<(ToggleResult, DeckOutcome), PracticeError> {
    self.require_module("toggle", ModuleType::Vocabulary)?;
    self.require_item(item_id)?;

    let learned = self.tracker.toggle(item_id);
    let mut outcome = DeckOutcome::default();
    outcome.mutations.push(ProgressMutation::Vocabulary {
      user_id: self.user_id,
      word_id: item_id.to_string(),
      learned,
    });

    if learned {
      outcome.mutations.push(ProgressMutation::Activity {
        user_id: self.user_id,
      });
      outcome.events.push(DeckEvent::MarkedLearned {
        item_id: item_id.to_string(),
      });
    } else {
      outcome.events.push(DeckEvent::Unmarked {
        item_id: item_id.to_string(),
      });
    }

    let result = ToggleResult {
      learned,
      total_learned_in_session: self.tracker.count(),
    };
    Ok((result, self.finish(outcome)))
  }

  /// Toggle the item under the cursor.
  pub fn toggle_current(&mut self) -> Result<(ToggleResult, DeckOutcome), PracticeError> {
    let id = self.require_current()?;
    self.toggle_learned(&id)
  }

  /// Check an answer against the current lesson's practice exercise.
  ///
  /// The lesson counts as completed either way; the score records correctness.
  pub fn answer_grammar(&mut self, catalog: &Catalog, answer: &str) -> Result<DeckOutcome, PracticeError> {
    self.require_module("answer", ModuleType::Grammar)?;
    let id = self.require_current()?;
    let exercise = catalog
      .get(self.module, &id)
      .and_then(Item::as_lesson)
      .and_then(|lesson| lesson.practice_exercise())
      .ok_or_else(|| PracticeError::UnknownItem(id.clone()))?;

    let correct = answer.trim() == exercise.answer.trim();
    self.tracker.mark(&id);

    let outcome = DeckOutcome {
      mutations: vec![
        ProgressMutation::Grammar {
          user_id: self.user_id,
          lesson_id: id.clone(),
          completed: true,
          score: Some(i64::from(correct)),
        },
        ProgressMutation::Activity {
          user_id: self.user_id,
        },
      ],
      events: vec![DeckEvent::LessonChecked {
        item_id: id,
        correct,
        correct_answer: exercise.answer.clone(),
      }],
    };
    Ok(self.finish(outcome))
  }

  /// Mark the current speaking exercise as completed.
  pub fn record_speaking(&mut self, recording_url: Option<String>) -> Result<DeckOutcome, PracticeError> {
    self.require_module("record", ModuleType::Speaking)?;
    let id = self.require_current()?;
    self.tracker.mark(&id);

    let outcome = DeckOutcome {
      mutations: vec![
        ProgressMutation::Speaking {
          user_id: self.user_id,
          exercise_id: id.clone(),
          completed: true,
          recording_url,
        },
        ProgressMutation::Activity {
          user_id: self.user_id,
        },
      ],
      events: vec![DeckEvent::Recorded { item_id: id }],
    };
    Ok(self.finish(outcome))
  }

  /// Store a writing submission for the current prompt and move to the next one.
  pub fn submit_writing(&mut self, catalog: &Catalog, submission: &str) -> Result<DeckOutcome, PracticeError> {
    self.require_module("submit", ModuleType::Writing)?;
    let id = self.require_current()?;
    let prompt = catalog
      .get(self.module, &id)
      .and_then(Item::as_prompt)
      .ok_or_else(|| PracticeError::UnknownItem(id.clone()))?;

    let word_count = WritingPrompt::word_count(submission);
    if !prompt.accepts(submission) {
      return Err(PracticeError::SubmissionLength {
        count: word_count,
        min: prompt.min_words,
        max: prompt.max_words,
      });
    }

    self.tracker.mark(&id);
    let outcome = DeckOutcome {
      mutations: vec![
        ProgressMutation::Writing {
          user_id: self.user_id,
          prompt_id: id.clone(),
          submission: submission.to_string(),
          feedback: None,
        },
        ProgressMutation::Activity {
          user_id: self.user_id,
        },
      ],
      events: vec![DeckEvent::Submitted {
        item_id: id,
        word_count,
      }],
    };
    let outcome = self.finish(outcome);
    self.cursor.next();
    Ok(outcome)
  }

  // ==================== Restart ====================

  pub fn restart(&mut self, catalog: &Catalog) -> DeckOutcome {
    let mut rng = rand::rng();
    self.restart_with_rng(catalog, &mut rng)
  }

  /// Draw a fresh session and reset the cursor and session progress.
  pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) -> DeckOutcome {
    self.items = create_session_with_rng(catalog, self.module, self.size, self.topic.as_deref(), rng);
    self.cursor.reset(self.items.len());
    self
      .tracker
      .reset(self.policy.target(self.size, self.items.len()));
    self.round += 1;
    self.celebrated = false;

    let outcome = DeckOutcome {
      mutations: Vec::new(),
      events: vec![DeckEvent::Restarted { round: self.round }],
    };
    self.notifications = outcome.events.clone();
    outcome
  }

  // ==================== View ====================

  pub fn view(&self, catalog: &Catalog) -> DeckView {
    let current = self
      .current_id()
      .and_then(|id| catalog.get(self.module, id))
      .cloned();
    let learned_ids: Vec<String> = self
      .items
      .iter()
      .filter(|id| self.tracker.contains(id))
      .cloned()
      .collect();

    DeckView {
      module: self.module,
      user_id: self.user_id,
      topic: self.topic.clone(),
      items: self.items.clone(),
      index: self.cursor.index(),
      revealed: self.cursor.revealed(),
      current,
      learned_count: learned_ids.len(),
      learned_ids,
      target: self.tracker.target(),
      progress_percent: self.tracker.percent(self.items.len()),
      complete: self.is_complete(),
      round: self.round,
      notifications: self.notifications.clone(),
    }
  }

  // ==================== Internals ====================

  fn require_module(&self, action: &'static str, expected: ModuleType) -> Result<(), PracticeError> {
    if self.module == expected {
      Ok(())
    } else {
      Err(PracticeError::WrongModule {
        action,
        module: self.module,
      })
    }
  }

  fn require_current(&self) -> Result<String, PracticeError> {
    self
      .current_id()
      .map(str::to_string)
      .ok_or(PracticeError::EmptySession)
  }

  fn require_item(&self, item_id: &str) -> Result<(), PracticeError> {
    if self.items.is_empty() {
      return Err(PracticeError::EmptySession);
    }
    if !self.items.iter().any(|id| id == item_id) {
      return Err(PracticeError::UnknownItem(item_id.to_string()));
    }
    Ok(())
  }

  /// Run the completion check after a progress change and record notifications.
  fn finish(&mut self, mut outcome: DeckOutcome) -> DeckOutcome {
    if self.is_complete() {
      if !self.celebrated {
        self.celebrated = true;
        outcome.events.push(DeckEvent::SessionComplete {
          learned: self.tracker.count(),
        });
      }
    } else {
      self.celebrated = false;
    }
    self.notifications = outcome.events.clone();
    outcome
  }
}
