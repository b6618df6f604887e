//! Progress aggregates for the dashboard and topics page

use rusqlite::{Connection, Result};

use crate::content::Catalog;
use crate::domain::{ModuleSummary, ModuleType};

/// Per-topic vocabulary progress
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
  pub topic: String,
  pub total_words: usize,
  pub words_learned: usize,
}

impl TopicProgress {
  pub fn percentage(&self) -> usize {
    if self.total_words > 0 {
      (self.words_learned * 100) / self.total_words
    } else {
      0
    }
  }
}

/// Completed/total per module. Only items still in the catalog count as completed.
pub fn get_module_summaries(
  conn: &Connection,
  catalog: &Catalog,
  user_id: i64,
) -> Result<Vec<ModuleSummary>> {
  let mut summaries = Vec::with_capacity(ModuleType::ALL.len());

  for module in ModuleType::ALL {
    let positive = super::get_positive_item_ids(conn, module, user_id)?;
    let completed = catalog
      .items(module)
      .iter()
      .filter(|item| positive.contains(&item.id))
      .count();
    summaries.push(ModuleSummary {
      module,
      completed: completed as i64,
      total: catalog.len(module) as i64,
    });
  }

  Ok(summaries)
}

/// Vocabulary topics with the number of words the user has learned in each.
pub fn get_topic_progress(
  conn: &Connection,
  catalog: &Catalog,
  user_id: i64,
) -> Result<Vec<TopicProgress>> {
  let learned = super::get_positive_item_ids(conn, ModuleType::Vocabulary, user_id)?;

  let topics = catalog
    .topics(ModuleType::Vocabulary)
    .into_iter()
    .map(|summary| {
      let words_learned = catalog
        .filtered(ModuleType::Vocabulary, Some(&summary.topic))
        .iter()
        .filter(|item| learned.contains(&item.id))
        .count();
      TopicProgress {
        topic: summary.topic,
        total_words: summary.total_words,
        words_learned,
      }
    })
    .collect();

  Ok(topics)
}
