//! Queue of pending progress writes drained by a single background worker.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{GatewayError, ProgressGateway, ProgressMutation};
use crate::config;

/// Retry policy for one mutation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
  pub max_attempts: u32,
  pub backoff: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: config::OUTBOX_MAX_ATTEMPTS,
      backoff: Duration::from_millis(config::OUTBOX_RETRY_BACKOFF_MS),
    }
  }
}

/// Sending side of the outbox. Cheap to clone; enqueueing never blocks.
#[derive(Clone)]
pub struct OutboxHandle {
  tx: mpsc::UnboundedSender<ProgressMutation>,
}

impl OutboxHandle {
  pub fn enqueue(&self, mutation: ProgressMutation) -> Result<(), GatewayError> {
    self.tx.send(mutation).map_err(|e| {
      tracing::warn!("Outbox closed, dropping {:?}", e.0);
      GatewayError::Closed
    })
  }

  pub fn enqueue_all(&self, mutations: impl IntoIterator<Item = ProgressMutation>) {
    for mutation in mutations {
      // Already logged; the caller's local state stands regardless
      let _ = self.enqueue(mutation);
    }
  }
}

pub struct Outbox;

impl Outbox {
  /// Start the worker. It runs until every handle is dropped and the queue is drained.
  pub fn spawn<G: ProgressGateway>(gateway: G) -> (OutboxHandle, JoinHandle<()>) {
    Self::spawn_with_policy(gateway, RetryPolicy::default())
  }

  pub fn spawn_with_policy<G: ProgressGateway>(
    gateway: G,
    policy: RetryPolicy,
  ) -> (OutboxHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<ProgressMutation>();
    let gateway = Arc::new(gateway);

    let worker = tokio::spawn(async move {
      while let Some(mutation) = rx.recv().await {
        deliver(gateway.as_ref(), &mutation, policy).await;
      }
      tracing::debug!("Outbox worker stopped");
    });

    (OutboxHandle { tx }, worker)
  }
}

/// Apply one mutation, retrying with linear backoff. Returns whether it landed.
async fn deliver<G: ProgressGateway>(
  gateway: &G,
  mutation: &ProgressMutation,
  policy: RetryPolicy,
) -> bool {
  let mut attempt = 0u32;
  while attempt < policy.max_attempts {
    attempt += 1;
    match gateway.apply(mutation) {
      Ok(()) => return true,
      Err(e) => {
        tracing::debug!("Progress write attempt {} failed: {}", attempt, e);
        if attempt < policy.max_attempts {
          tokio::time::sleep(policy.backoff * attempt).await;
        }
      }
    }
  }

  tracing::warn!(
    "Dropping progress write for user {} after {} attempts: {:?}",
    mutation.user_id(),
    policy.max_attempts,
    mutation
  );
  false
}
