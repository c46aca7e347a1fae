use super::{StoreState, UserStore};
use crate::core::{DeckError, Result};
use crate::storage::{PersistedSnapshot, SnapshotView};
use serde_json::Value;
use std::sync::MutexGuard;
use tracing::{debug, error, info};

impl UserStore {
    /// Writes the current snapshot through the persistence gateway.
    ///
    /// Failures are logged by the gateway and never reach the caller.
    pub fn persist_state(&self) {
        self.persist_locked(self.state());
    }

    /// Marks the change and persists immediately.
    pub(super) fn commit(&self, state: MutexGuard<'_, StoreState>) {
        self.mark_dirty();
        self.persist_locked(state);
    }

    fn persist_locked(&self, mut state: MutexGuard<'_, StoreState>) {
        let revision = self.revision();
        let view = SnapshotView {
            filters: &state.filters,
            users: &state.users,
            tags: &state.tags,
            selected_user_id: state
                .selected_user
                .as_ref()
                .map(|u| u.id.as_str())
                .filter(|id| !id.is_empty()),
        };
        let value = match serde_json::to_value(&view) {
            Ok(value) => value,
            Err(err) => {
                error!(error = %err, "failed to serialize store snapshot");
                return;
            }
        };
        state.persisted_revision = revision;
        drop(state);

        self.storage.save(&self.config.storage_key, &value);
        debug!(revision, key = %self.config.storage_key, "persisted store snapshot");
    }

    /// Reads the last persisted snapshot; a stored `null` counts as none.
    pub(super) fn load_snapshot(&self) -> Result<Option<PersistedSnapshot>> {
        match self.storage.load(&self.config.storage_key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                DeckError::SnapshotError(format!(
                    "Stored state under '{}' has an unexpected shape: {}",
                    self.config.storage_key, e
                ))
            }),
        }
    }

    /// Applies the persisted snapshot to the store.
    ///
    /// Restores the tag vocabulary wholesale, each filter field that is
    /// present, and the selection, resolved by id against the users currently
    /// in memory. Persisted users are not reinstated; they only feed the merge
    /// in [`UserStore::fetch_next_page`]. `hydrated` is set whatever the
    /// outcome, including when the snapshot cannot be read.
    pub fn restore_from_persistence(&self) -> Result<()> {
        let loaded = self.load_snapshot();
        let revision = self.revision();
        let mut state = self.state();
        state.hydrated = true;

        let snapshot = match loaded? {
            Some(snapshot) => snapshot,
            None => {
                debug!("no persisted snapshot to restore");
                return Ok(());
            }
        };

        let selected_id = snapshot.selected_id().map(str::to_owned);
        state.tags = snapshot.tags.unwrap_or_default();
        if let Some(filters) = snapshot.filters {
            filters.apply_to(&mut state.filters);
        }
        if let Some(id) = selected_id {
            state.selected_user = state.users.iter().find(|u| u.id == id).cloned();
        }
        state.persisted_revision = revision;

        info!(
            tags = state.tags.len(),
            selected = state.selected_user.is_some(),
            "restored persisted state"
        );
        Ok(())
    }
}
