//! Built-in content used when no catalog file is configured.

use crate::domain::{
  GrammarExercise, GrammarLesson, Item, ItemPayload, SpeakingExercise, Word, WritingPrompt,
};

/// Vocabulary size after generated words are appended to the hand-written ones
pub const GENERATED_VOCABULARY_SIZE: usize = 1000;

pub const TOPICS: [&str; 10] = [
  "Business",
  "Technology",
  "Science",
  "Arts",
  "Daily Life",
  "Academic",
  "Nature",
  "Social",
  "Culture",
  "Sports",
];

pub const LEVELS: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];

fn pronunciation_url(word: &str) -> Option<String> {
  Some(format!(
    "https://api.dictionaryapi.dev/media/pronunciations/en/{word}-us.mp3"
  ))
}

// Helper to build a hand-written vocabulary item
fn word(id: &str, text: &str, phonetic: &str, definition: &str, example: &str, context: &str) -> Item {
  Item::new(
    id,
    None,
    ItemPayload::Vocabulary(Word {
      word: text.to_string(),
      phonetic: phonetic.to_string(),
      audio_url: pronunciation_url(text),
      definition: definition.to_string(),
      example: example.to_string(),
      context: context.to_string(),
      level: None,
    }),
  )
}

fn base_words() -> Vec<Item> {
  vec![
    word(
      "w1",
      "ephemeral",
      "/ɪˈfem(ə)rəl/",
      "lasting for a very short time",
      "The ephemeral beauty of a sunset",
      "The ephemeral nature of social media trends makes it hard to keep up.",
    ),
    word(
      "w2",
      "ubiquitous",
      "/juːˈbɪkwɪtəs/",
      "present everywhere",
      "Mobile phones are ubiquitous in modern life",
      "The ubiquitous nature of plastic pollution is a global concern.",
    ),
    word(
      "w3",
      "serendipity",
      "/ˌserənˈdɪpəti/",
      "the occurrence and development of events by chance in a happy or beneficial way",
      "The discovery of penicillin was a case of serendipity",
      "Many great scientific discoveries happened through serendipity.",
    ),
    word(
      "w4",
      "algorithm",
      "/ˈælɡəˌrɪðəm/",
      "a process or set of rules to be followed in calculations or other problem-solving operations",
      "The search engine uses complex algorithms to rank pages",
      "Social media algorithms determine what content appears in your feed.",
    ),
  ]
}

/// Placeholder words filling the vocabulary up to `total`, spread evenly over topics and levels.
pub fn generated_words(start: usize, total: usize) -> Vec<Item> {
  (start..=total)
    .map(|i| {
      let topic = TOPICS[i % TOPICS.len()];
      let level = LEVELS[i % LEVELS.len()];
      Item::new(
        format!("w{i}"),
        Some(topic),
        ItemPayload::Vocabulary(Word {
          word: format!("{level}Word{i}"),
          phonetic: "/example/".to_string(),
          audio_url: pronunciation_url(&format!("word{i}")),
          definition: format!("Definition for word {i} in {topic}"),
          example: format!("Example sentence for word {i}"),
          context: format!("Context sentence for word {i} in {topic}"),
          level: Some(level.to_string()),
        }),
      )
    })
    .collect()
}

fn lesson(
  id: &str,
  title: &str,
  explanation: &str,
  examples: &[&str],
  question: &str,
  answer: &str,
  options: &[&str],
) -> Item {
  Item::new(
    id,
    None,
    ItemPayload::Grammar(GrammarLesson {
      title: title.to_string(),
      explanation: explanation.to_string(),
      examples: examples.iter().map(|s| s.to_string()).collect(),
      exercises: vec![GrammarExercise {
        question: question.to_string(),
        answer: answer.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
      }],
    }),
  )
}

fn grammar_lessons() -> Vec<Item> {
  vec![
    lesson(
      "g1",
      "Present Simple",
      "Used for habits, repeated actions, and general truths",
      &["I work in London", "The sun rises in the east"],
      "She ___ (work) as a teacher",
      "works",
      &["work", "works", "working", "worked"],
    ),
    lesson(
      "g2",
      "Past Simple",
      "Used for finished actions at a specific time in the past",
      &["I visited Paris last year", "She didn't call me yesterday"],
      "They ___ (go) to the beach last weekend",
      "went",
      &["go", "goes", "went", "gone"],
    ),
    lesson(
      "g3",
      "Present Continuous",
      "Used for actions happening now or around now",
      &["I am reading a book", "They are building a new bridge"],
      "Look! It ___ (rain)",
      "is raining",
      &["rains", "is raining", "rained", "rain"],
    ),
  ]
}

fn speaking_exercises() -> Vec<Item> {
  let exercise = |id: &str, phrase: &str, difficulty: &str, tips: &str| {
    Item::new(
      id,
      None,
      ItemPayload::Speaking(SpeakingExercise {
        phrase: phrase.to_string(),
        difficulty: difficulty.to_string(),
        tips: tips.to_string(),
      }),
    )
  };

  vec![
    exercise(
      "s1",
      "How are you doing today?",
      "beginner",
      "Focus on the natural rhythm and intonation",
    ),
    exercise(
      "s2",
      "Could you tell me the way to the station?",
      "intermediate",
      "Keep the question intonation rising at the end",
    ),
    exercise(
      "s3",
      "The sun was setting behind the mountains, casting long shadows across the valley.",
      "advanced",
      "Pause briefly at the comma and link the words in each phrase",
    ),
  ]
}

fn writing_prompts() -> Vec<Item> {
  let prompt = |id: &str, title: &str, description: &str, min_words: usize, max_words: usize| {
    Item::new(
      id,
      None,
      ItemPayload::Writing(WritingPrompt {
        title: title.to_string(),
        description: description.to_string(),
        min_words,
        max_words,
      }),
    )
  };

  vec![
    prompt(
      "p1",
      "Your Daily Routine",
      "Write about your typical day, using present simple tense",
      50,
      200,
    ),
    prompt(
      "p2",
      "A Memorable Trip",
      "Describe a trip you took, using past simple tense",
      80,
      250,
    ),
  ]
}

/// All built-in items.
pub fn builtin_items() -> Vec<Item> {
  let mut items = base_words();
  let next = items.len() + 1;
  items.extend(generated_words(next, GENERATED_VOCABULARY_SIZE));
  items.extend(grammar_lessons());
  items.extend(speaking_exercises());
  items.extend(writing_prompts());
  items
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ModuleType;

  #[test]
  fn test_vocabulary_size() {
    let words = builtin_items()
      .into_iter()
      .filter(|i| i.module_type() == ModuleType::Vocabulary)
      .count();
    assert_eq!(words, GENERATED_VOCABULARY_SIZE);
  }

  #[test]
  fn test_generated_words_have_topics_and_levels() {
    let words = generated_words(5, 20);
    assert_eq!(words.len(), 16);
    assert_eq!(words[0].id, "w5");
    for item in &words {
      assert!(item.topic.is_some());
      assert!(item.as_word().unwrap().level.is_some());
    }
  }

  #[test]
  fn test_grammar_answers_are_options() {
    for item in grammar_lessons() {
      let lesson = item.as_lesson().unwrap();
      let exercise = lesson.practice_exercise().unwrap();
      assert!(exercise.options.contains(&exercise.answer), "{}", item.id);
    }
  }

  #[test]
  fn test_writing_bounds_are_ordered() {
    for item in writing_prompts() {
      let prompt = item.as_prompt().unwrap();
      assert!(prompt.min_words <= prompt.max_words);
    }
  }
}
