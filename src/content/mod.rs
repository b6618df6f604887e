//! Content catalog - read-only learning items partitioned by module and topic.
//!
//! The catalog is built once at startup, either from a JSON catalog file or from
//! the built-in seed content, and shared immutably afterwards.

pub mod loader;
pub mod seed;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::domain::{Item, ModuleType};

pub use loader::{load_catalog_file, CatalogError};

/// Topic listing entry for the topics page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
  pub topic: String,
  pub total_words: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  items: HashMap<ModuleType, Vec<Item>>,
}

impl Catalog {
  /// Build a catalog, rejecting duplicate ids within a module.
  pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
    let mut by_module: HashMap<ModuleType, Vec<Item>> = HashMap::new();
    let mut seen: HashSet<(ModuleType, String)> = HashSet::new();

    for item in items {
      let module = item.module_type();
      if item.id.trim().is_empty() {
        return Err(CatalogError::EmptyId(module));
      }
      if !seen.insert((module, item.id.clone())) {
        return Err(CatalogError::DuplicateId {
          module,
          id: item.id,
        });
      }
      by_module.entry(module).or_default().push(item);
    }

    Ok(Self { items: by_module })
  }

  /// The built-in content shipped with the binary.
  pub fn builtin() -> Self {
    Self::new(seed::builtin_items()).unwrap_or_else(|e| {
      tracing::error!("Built-in catalog is invalid: {}", e);
      Self::default()
    })
  }

  /// Load the catalog from `path`, falling back to the built-in content when the file
  /// is missing or unreadable.
  pub fn load_or_builtin(path: &Path) -> Self {
    if !path.exists() {
      tracing::info!("No catalog at {}, using built-in content", path.display());
      return Self::builtin();
    }

    match load_catalog_file(path).and_then(Self::new) {
      Ok(catalog) => {
        tracing::info!("Loaded catalog from {}", path.display());
        catalog
      }
      Err(e) => {
        tracing::warn!("Failed to load catalog ({}), using built-in content", e);
        Self::builtin()
      }
    }
  }

  /// All items of a module in catalog order.
  pub fn items(&self, module: ModuleType) -> &[Item] {
    self.items.get(&module).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Items of a module, optionally restricted to one topic.
  pub fn filtered(&self, module: ModuleType, topic: Option<&str>) -> Vec<&Item> {
    self
      .items(module)
      .iter()
      .filter(|item| topic.is_none_or(|t| item.has_topic(t)))
      .collect()
  }

  pub fn get(&self, module: ModuleType, id: &str) -> Option<&Item> {
    self.items(module).iter().find(|item| item.id == id)
  }

  pub fn len(&self, module: ModuleType) -> usize {
    self.items(module).len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.values().all(Vec::is_empty)
  }

  /// Distinct topics of a module with their item counts, sorted by name.
  pub fn topics(&self, module: ModuleType) -> Vec<TopicSummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for topic in self.items(module).iter().filter_map(|i| i.topic.as_deref()) {
      *counts.entry(topic).or_default() += 1;
    }

    counts
      .into_iter()
      .map(|(topic, total_words)| TopicSummary {
        topic: topic.to_string(),
        total_words,
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ItemPayload, SpeakingExercise, Word};

  fn word(id: &str, topic: Option<&str>) -> Item {
    Item::new(
      id,
      topic,
      ItemPayload::Vocabulary(Word {
        word: format!("word-{id}"),
        phonetic: "/x/".into(),
        audio_url: None,
        definition: format!("definition of {id}"),
        example: String::new(),
        context: String::new(),
        level: None,
      }),
    )
  }

  fn phrase(id: &str) -> Item {
    Item::new(
      id,
      None,
      ItemPayload::Speaking(SpeakingExercise {
        phrase: "How are you?".into(),
        difficulty: "beginner".into(),
        tips: String::new(),
      }),
    )
  }

  #[test]
  fn test_partitions_by_module() {
    let catalog = Catalog::new(vec![word("w1", None), phrase("s1"), word("w2", None)]).unwrap();
    assert_eq!(catalog.len(ModuleType::Vocabulary), 2);
    assert_eq!(catalog.len(ModuleType::Speaking), 1);
    assert_eq!(catalog.len(ModuleType::Grammar), 0);
    assert!(catalog.items(ModuleType::Writing).is_empty());
  }

  #[test]
  fn test_same_id_in_different_modules_is_allowed() {
    let catalog = Catalog::new(vec![word("x1", None), phrase("x1")]).unwrap();
    assert!(catalog.get(ModuleType::Vocabulary, "x1").is_some());
    assert!(catalog.get(ModuleType::Speaking, "x1").is_some());
  }

  #[test]
  fn test_duplicate_id_rejected() {
    let err = Catalog::new(vec![word("w1", None), word("w1", Some("Arts"))]).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { .. }));
  }

  #[test]
  fn test_empty_id_rejected() {
    let err = Catalog::new(vec![word(" ", None)]).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyId(ModuleType::Vocabulary)));
  }

  #[test]
  fn test_topic_filter() {
    let catalog = Catalog::new(vec![
      word("w1", Some("Arts")),
      word("w2", Some("Science")),
      word("w3", Some("Arts")),
      word("w4", None),
    ])
    .unwrap();

    let arts: Vec<_> = catalog
      .filtered(ModuleType::Vocabulary, Some("Arts"))
      .iter()
      .map(|i| i.id.as_str())
      .collect();
    assert_eq!(arts, vec!["w1", "w3"]);
    assert_eq!(catalog.filtered(ModuleType::Vocabulary, None).len(), 4);
    assert!(catalog.filtered(ModuleType::Vocabulary, Some("Sports")).is_empty());
  }

  #[test]
  fn test_topics_sorted_with_counts() {
    let catalog = Catalog::new(vec![
      word("w1", Some("Science")),
      word("w2", Some("Arts")),
      word("w3", Some("Science")),
      word("w4", None),
    ])
    .unwrap();

    let topics = catalog.topics(ModuleType::Vocabulary);
    assert_eq!(
      topics,
      vec![
        TopicSummary { topic: "Arts".into(), total_words: 1 },
        TopicSummary { topic: "Science".into(), total_words: 2 },
      ]
    );
  }

  #[test]
  fn test_builtin_has_every_module() {
    let catalog = Catalog::builtin();
    for module in ModuleType::ALL {
      assert!(catalog.len(module) > 0, "no {} content", module);
    }
  }
}
