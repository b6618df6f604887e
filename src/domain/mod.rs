pub mod item;
pub mod progress;
pub mod streak;

pub use item::{
  GrammarExercise, GrammarLesson, Item, ItemPayload, ModuleType, SpeakingExercise, Word,
  WritingPrompt,
};
pub use progress::{
  GrammarProgress, ModuleSummary, ProgressStatus, SpeakingProgress, VocabularyProgress,
  WritingProgress,
};
pub use streak::{StreakCounts, UserStreak};
