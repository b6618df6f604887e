//! Application state shared by all handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::content::Catalog;
use crate::db::DbPool;
use crate::session::SessionStore;
use crate::sync::OutboxHandle;

#[derive(Clone)]
pub struct AppState {
  /// In-memory progress store
  pub db: DbPool,
  /// Read-only content, loaded once at startup
  pub catalog: Arc<Catalog>,
  /// Practice decks and quiz games per client session
  pub sessions: SessionStore,
  /// Queue for best-effort progress writes from practice transitions
  pub outbox: OutboxHandle,
  pub settings: Arc<Settings>,
}

impl AppState {
  pub fn new(db: DbPool, catalog: Catalog, outbox: OutboxHandle, settings: Settings) -> Self {
    Self {
      db,
      catalog: Arc::new(catalog),
      sessions: SessionStore::new(),
      outbox,
      settings: Arc::new(settings),
    }
  }
}
