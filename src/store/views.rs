use super::UserStore;
use crate::core::{Filters, User};
use std::collections::HashSet;

impl UserStore {
    /// Users passing the current filters, in collection order.
    ///
    /// Computed on every call.
    pub fn filtered_users(&self) -> Vec<User> {
        let state = self.state();
        state
            .users
            .iter()
            .filter(|user| state.filters.matches(user))
            .cloned()
            .collect()
    }

    /// The vocabulary without duplicates, in first-occurrence order.
    pub fn all_tags(&self) -> Vec<String> {
        let state = self.state();
        let mut seen = HashSet::new();
        state
            .tags
            .iter()
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn set_filters(&self, filters: Filters) {
        self.update_filters(|current| *current = filters);
    }

    pub fn set_search_text(&self, text: &str) {
        self.update_filters(|filters| filters.search_text = text.to_string());
    }

    pub fn set_gender(&self, gender: Option<&str>) {
        self.update_filters(|filters| filters.gender = gender.map(str::to_owned));
    }

    pub fn set_favorites_only(&self, favorites_only: bool) {
        self.update_filters(|filters| filters.favorites_only = favorites_only);
    }

    /// Filters are persisted by the orchestrator, not here.
    fn update_filters<F>(&self, apply: F)
    where
        F: FnOnce(&mut Filters),
    {
        let mut state = self.state();
        let before = state.filters.clone();
        apply(&mut state.filters);
        let changed = state.filters != before;
        drop(state);
        if changed {
            self.mark_dirty();
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replaces the selection. `user` need not belong to the collection.
    pub fn set_selected_user(&self, user: User) {
        let mut state = self.state();
        let changed = state.selected_user.as_ref() != Some(&user);
        state.selected_user = Some(user);
        drop(state);
        if changed {
            self.mark_dirty();
        }
    }

    pub fn clear_selected_user(&self) {
        let previous = self.state().selected_user.take();
        if previous.is_some() {
            self.mark_dirty();
        }
    }
}
