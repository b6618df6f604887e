//! Session selection - a bounded, uniformly shuffled draw from the catalog.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::content::Catalog;
use crate::domain::ModuleType;

/// Pick up to `n` distinct item ids of `module`, optionally restricted to `topic`.
///
/// The result has `min(n, |filtered|)` ids and is empty when nothing matches.
pub fn create_session(
  catalog: &Catalog,
  module: ModuleType,
  n: usize,
  topic: Option<&str>,
) -> Vec<String> {
  let mut rng = rand::rng();
  create_session_with_rng(catalog, module, n, topic, &mut rng)
}

pub fn create_session_with_rng<R: Rng + ?Sized>(
  catalog: &Catalog,
  module: ModuleType,
  n: usize,
  topic: Option<&str>,
  rng: &mut R,
) -> Vec<String> {
  // Shuffle a copy; catalog order is never touched
  let mut ids: Vec<String> = catalog
    .filtered(module, topic)
    .into_iter()
    .map(|item| item.id.clone())
    .collect();

  ids.shuffle(rng);
  ids.truncate(n);

  if ids.is_empty() {
    tracing::debug!("No {} content for topic {:?}", module, topic);
  }
  ids
}
