//! Practice engine: session selection, navigation, session progress, and the quiz game.

pub mod cursor;
pub mod deck;
pub mod quiz;
pub mod selector;
pub mod tracker;

use crate::domain::ModuleType;

pub use cursor::Cursor;
pub use deck::{DeckEvent, DeckOutcome, DeckView, PracticeDeck, ToggleResult};
pub use quiz::{QuizAnswer, QuizGame, QuizOption, QuizView};
pub use selector::{create_session, create_session_with_rng};
pub use tracker::{is_session_complete, CompletionPolicy, SessionTracker};

/// Rejected practice transitions. State is left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PracticeError {
  #[error("Index {index} is out of range for a session of {len} items")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("The session has no items")]
  EmptySession,

  #[error("No {0} session has been started")]
  NoSession(ModuleType),

  #[error("'{action}' is not available in the {module} module")]
  WrongModule {
    action: &'static str,
    module: ModuleType,
  },

  #[error("Item '{0}' is not part of this session")]
  UnknownItem(String),

  #[error("Submission has {count} words; write between {min} and {max}")]
  SubmissionLength { count: usize, min: usize, max: usize },

  #[error("No quiz is running")]
  NoQuiz,

  #[error("Not enough words for a quiz (need {needed}, have {available})")]
  NotEnoughWords { needed: usize, available: usize },

  #[error("This question has already been answered")]
  AlreadyAnswered,

  #[error("The quiz is over")]
  QuizFinished,

  #[error("Option {option} does not exist (question has {count})")]
  InvalidOption { option: usize, count: usize },
}
