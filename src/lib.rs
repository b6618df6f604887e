pub mod config;
pub mod content;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod paths;
pub mod practice;
pub mod session;
pub mod state;
pub mod sync;

#[cfg(test)]
pub mod testing;

use axum::Router;
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::content::Catalog;
use crate::state::AppState;
use crate::sync::{DbGateway, Outbox};

/// Wire the progress store, outbox worker and shared state together.
///
/// Must be called inside a tokio runtime; the returned handle is the outbox worker.
pub fn init_state(settings: Settings, catalog: Catalog) -> rusqlite::Result<(AppState, JoinHandle<()>)> {
  let pool = db::init_db()?;
  let (outbox, worker) = Outbox::spawn(DbGateway::new(pool.clone()));
  Ok((AppState::new(pool, catalog, outbox, settings), worker))
}

/// Build the application router over `state`.
pub fn app(state: AppState) -> Router {
  handlers::router(state)
}
