//! Bridges store mutations to the persistence gateway.
//!
//! On activation the orchestrator restores the store from storage, then
//! spawns a background task that watches the store's revision counter. Each
//! change restarts a quiet-period timer; when the timer runs out the store is
//! persisted once, provided it is still dirty. Shutting down (or dropping
//! the orchestrator) persists immediately without waiting for the timer.

use crate::config::OrchestratorConfig;
use crate::core::{DeckError, Result};
use crate::store::UserStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

pub struct PersistenceOrchestrator {
    store: Arc<UserStore>,
    stop_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl PersistenceOrchestrator {
    /// Restores `store` and starts the debounce task.
    ///
    /// A failed restore is logged and does not prevent activation. Must be
    /// called from within a Tokio runtime.
    pub fn activate(store: Arc<UserStore>, config: OrchestratorConfig) -> Self {
        if let Err(err) = store.restore_from_persistence() {
            warn!(error = %err, "restore from persistence failed; starting with defaults");
        }

        let changes = store.subscribe();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let join_handle = tokio::spawn(debounce_loop(
            store.clone(),
            changes,
            stop_rx,
            config.quiet_period,
        ));

        Self {
            store,
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// Persists now, bypassing the quiet period.
    pub fn flush_now(&self) {
        self.store.persist_state();
    }

    /// Stops the debounce task and performs the termination flush.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        let joined = match self.join_handle.take() {
            Some(join_handle) => join_handle
                .await
                .map_err(|err| DeckError::StorageError(format!("persistence task join: {}", err))),
            None => Ok(()),
        };

        self.store.persist_state();
        joined
    }
}

impl Drop for PersistenceOrchestrator {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
            self.store.persist_state();
        }
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}

async fn debounce_loop(
    store: Arc<UserStore>,
    mut changes: watch::Receiver<u64>,
    mut stop_rx: oneshot::Receiver<()>,
    quiet_period: Duration,
) {
    loop {
        tokio::select! {
            _ = &mut stop_rx => return,
            changed = changes.changed() => {
                if changed.is_err() {
                    return;
                }
            }
        }

        // Every further change restarts the quiet period.
        loop {
            tokio::select! {
                _ = &mut stop_rx => return,
                changed = changes.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = sleep(quiet_period) => break,
            }
        }

        if store.is_dirty() {
            debug!(revision = store.revision(), "quiet period elapsed, persisting");
            store.persist_state();
        }
    }
}
