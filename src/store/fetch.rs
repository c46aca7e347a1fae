use super::UserStore;
use crate::core::{Result, User};
use crate::source::transform_page;
use tracing::{debug, error, info, warn};

/// What a call to [`UserStore::fetch_next_page`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Another fetch was in flight; nothing happened.
    Skipped,
    /// The page was appended and the cursor advanced.
    Fetched { count: usize },
    /// The page failed as a whole; `error` is set and the cursor kept.
    Failed,
}

/// Clears `loading` if the fetch future is dropped before it completes.
struct InFlight<'a> {
    store: &'a UserStore,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.store.state().loading = false;
        }
    }
}

impl UserStore {
    /// Fetches the page under the cursor and appends it to the collection.
    ///
    /// A call made while another fetch is in flight returns
    /// [`FetchOutcome::Skipped`] without touching state. Fetched records take
    /// their favorite flag and tags from the last persisted snapshot when it
    /// holds the same id. Existing entries are never replaced and ids are not
    /// checked for collisions.
    pub async fn fetch_next_page(&self) -> FetchOutcome {
        let page = {
            let mut state = self.state();
            if state.loading {
                debug!("fetch already in flight");
                return FetchOutcome::Skipped;
            }
            state.loading = true;
            state.error = None;
            state.page
        };
        let in_flight = InFlight { store: self, armed: true };

        let fetched = self.fetch_users(page).await;
        in_flight.disarm();

        match fetched {
            Ok(mut users) => {
                self.apply_persisted_annotations(&mut users);
                let count = users.len();

                let mut state = self.state();
                state.users.extend(users);
                state.page += 1;
                state.loading = false;
                info!(page, count, total = state.users.len(), "fetched user page");
                self.commit(state);
                FetchOutcome::Fetched { count }
            }
            Err(err) => {
                error!(page, error = %err, "failed to fetch user page");
                let mut state = self.state();
                state.error = Some(self.config.fetch_error_message.clone());
                state.loading = false;
                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_users(&self, page: u32) -> Result<Vec<User>> {
        let records = self.source.fetch_page(page, self.config.page_size).await?;
        transform_page(records, self.config.malformed_records)
    }

    /// Annotations come from storage, not from the in-memory collection.
    fn apply_persisted_annotations(&self, users: &mut [User]) {
        let snapshot = match self.load_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable snapshot during merge");
                return;
            }
        };

        let annotations = snapshot.annotations();
        for user in users.iter_mut() {
            match annotations.get(user.id.as_str()) {
                Some(annotation) => {
                    user.is_favorite = annotation.is_favorite;
                    user.tags = annotation.tags.clone();
                }
                None => {
                    user.is_favorite = false;
                    user.tags.clear();
                }
            }
        }
    }
}
