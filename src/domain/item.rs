use serde::{Deserialize, Serialize};

/// Learning module an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
  Vocabulary,
  Grammar,
  Speaking,
  Writing,
}

impl ModuleType {
  pub const ALL: [ModuleType; 4] = [
    ModuleType::Vocabulary,
    ModuleType::Grammar,
    ModuleType::Speaking,
    ModuleType::Writing,
  ];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "vocabulary" | "Vocabulary" => Some(Self::Vocabulary),
      "grammar" | "Grammar" => Some(Self::Grammar),
      "speaking" | "Speaking" => Some(Self::Speaking),
      "writing" | "Writing" => Some(Self::Writing),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vocabulary => "vocabulary",
      Self::Grammar => "grammar",
      Self::Speaking => "speaking",
      Self::Writing => "writing",
    }
  }
}

impl std::fmt::Display for ModuleType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A vocabulary flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
  pub word: String,
  pub phonetic: String,
  #[serde(default)]
  pub audio_url: Option<String>,
  pub definition: String,
  pub example: String,
  pub context: String,
  #[serde(default)]
  pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarExercise {
  pub question: String,
  pub answer: String,
  pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarLesson {
  pub title: String,
  pub explanation: String,
  #[serde(default)]
  pub examples: Vec<String>,
  pub exercises: Vec<GrammarExercise>,
}

impl GrammarLesson {
  /// The exercise practised when the lesson is checked.
  pub fn practice_exercise(&self) -> Option<&GrammarExercise> {
    self.exercises.first()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakingExercise {
  pub phrase: String,
  pub difficulty: String,
  #[serde(default)]
  pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingPrompt {
  pub title: String,
  pub description: String,
  pub min_words: usize,
  pub max_words: usize,
}

impl WritingPrompt {
  /// Whitespace-separated word count, as shown to the writer.
  pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
  }

  pub fn accepts(&self, text: &str) -> bool {
    let count = Self::word_count(text);
    count >= self.min_words && count <= self.max_words
  }
}

/// Module-specific content carried by an item. The tag doubles as the item's module type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "moduleType", rename_all = "lowercase")]
pub enum ItemPayload {
  Vocabulary(Word),
  Grammar(GrammarLesson),
  Speaking(SpeakingExercise),
  Writing(WritingPrompt),
}

/// Immutable content unit owned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub topic: Option<String>,
  #[serde(flatten)]
  pub payload: ItemPayload,
}

impl Item {
  pub fn new(id: impl Into<String>, topic: Option<&str>, payload: ItemPayload) -> Self {
    Self {
      id: id.into(),
      topic: topic.map(str::to_string),
      payload,
    }
  }

  pub fn module_type(&self) -> ModuleType {
    match self.payload {
      ItemPayload::Vocabulary(_) => ModuleType::Vocabulary,
      ItemPayload::Grammar(_) => ModuleType::Grammar,
      ItemPayload::Speaking(_) => ModuleType::Speaking,
      ItemPayload::Writing(_) => ModuleType::Writing,
    }
  }

  pub fn as_word(&self) -> Option<&Word> {
    match &self.payload {
      ItemPayload::Vocabulary(word) => Some(word),
      _ => None,
    }
  }

  pub fn as_lesson(&self) -> Option<&GrammarLesson> {
    match &self.payload {
      ItemPayload::Grammar(lesson) => Some(lesson),
      _ => None,
    }
  }

  pub fn as_prompt(&self) -> Option<&WritingPrompt> {
    match &self.payload {
      ItemPayload::Writing(prompt) => Some(prompt),
      _ => None,
    }
  }

  pub fn has_topic(&self, topic: &str) -> bool {
    self.topic.as_deref() == Some(topic)
  }
}
