//! The record store.
//!
//! [`UserStore`] owns the canonical user collection, the annotations layered
//! on top of it (favorites, per-user tags), the global tag vocabulary, the
//! active filters and the pagination cursor. It is shared by handle
//! (`Arc<UserStore>`) between the caller and the persistence orchestrator.
//!
//! Every operation runs to completion under a short, non-async lock; only
//! [`UserStore::fetch_next_page`] suspends, and it releases the lock across
//! the source call. Mutations that change persisted state bump a revision
//! counter published on a `watch` channel, which is how the orchestrator
//! learns that a flush is due.

mod fetch;
mod persistence;
mod tags;
mod views;

pub use fetch::FetchOutcome;

use crate::config::StoreConfig;
use crate::core::{Filters, User};
use crate::source::SourceGateway;
use crate::storage::PersistenceGateway;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Clone)]
struct StoreState {
    users: Vec<User>,
    selected_user: Option<User>,
    filters: Filters,
    tags: Vec<String>,
    page: u32,
    loading: bool,
    error: Option<String>,
    hydrated: bool,
    /// Revision captured by the last persist.
    persisted_revision: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            selected_user: None,
            filters: Filters::default(),
            tags: Vec::new(),
            page: 1,
            loading: false,
            error: None,
            hydrated: false,
            persisted_revision: 0,
        }
    }
}

pub struct UserStore {
    state: Mutex<StoreState>,
    source: Arc<dyn SourceGateway>,
    storage: Arc<dyn PersistenceGateway>,
    config: StoreConfig,
    revision: watch::Sender<u64>,
}

impl UserStore {
    pub fn new(source: Arc<dyn SourceGateway>, storage: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_config(source, storage, StoreConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn SourceGateway>,
        storage: Arc<dyn PersistenceGateway>,
        config: StoreConfig,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(StoreState::default()),
            source,
            storage,
            config,
            revision,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Change tracking
    // ------------------------------------------------------------------

    /// Receiver that observes every revision bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Whether state changed since the last persist.
    pub fn is_dirty(&self) -> bool {
        self.state().persisted_revision != self.revision()
    }

    fn mark_dirty(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state().users.len()
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.state().users.iter().find(|u| u.id == id).cloned()
    }

    /// The focused user.
    ///
    /// The selection is held by id: when the collection contains that id the
    /// current record is returned, otherwise the copy taken at selection time.
    pub fn selected_user(&self) -> Option<User> {
        let state = self.state();
        let selected = state.selected_user.as_ref()?;
        state
            .users
            .iter()
            .find(|u| u.id == selected.id)
            .or(Some(selected))
            .cloned()
    }

    pub fn filters(&self) -> Filters {
        self.state().filters.clone()
    }

    /// The raw vocabulary, in insertion order.
    pub fn tags(&self) -> Vec<String> {
        self.state().tags.clone()
    }

    /// Next page the store will request.
    pub fn page(&self) -> u32 {
        self.state().page
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// True once the startup restore has run, whether or not it found data.
    pub fn is_hydrated(&self) -> bool {
        self.state().hydrated
    }
}
