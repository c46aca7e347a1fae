use super::{StoreState, UserStore};

/// Replaces the first `old` with `new` in place and drops every other
/// occurrence of either name, so the list stays free of duplicates.
fn rename_entry(list: &mut Vec<String>, old: &str, new: &str) -> bool {
    let Some(index) = list.iter().position(|t| t == old) else {
        return false;
    };
    list[index] = new.to_string();

    let mut position = 0;
    list.retain(|t| {
        let keep = position == index || (t != old && t != new);
        position += 1;
        keep
    });
    true
}

impl UserStore {
    /// Flips the favorite flag of `id`. Unknown ids are ignored.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut state = self.state();
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return false;
        };
        user.is_favorite = !user.is_favorite;
        self.commit(state);
        true
    }

    /// Removes `tag` from the user if present, appends it otherwise.
    ///
    /// Unlike [`UserStore::add_tag_to_user`] this never registers the tag in
    /// the vocabulary.
    pub fn toggle_user_tag(&self, id: &str, tag: &str) -> bool {
        let mut state = self.state();
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return false;
        };
        match user.tags.iter().position(|t| t == tag) {
            Some(index) => {
                user.tags.remove(index);
            }
            None => user.tags.push(tag.to_string()),
        }
        self.commit(state);
        true
    }

    /// Appends `tag` to the user and, if new, to the vocabulary.
    ///
    /// Returns `false` when the user is unknown or already carries the tag.
    pub fn add_tag_to_user(&self, id: &str, tag: &str) -> bool {
        let mut state = self.state();
        let StoreState { users, tags, .. } = &mut *state;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return false;
        };
        if user.has_tag(tag) {
            return false;
        }
        user.tags.push(tag.to_string());
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
        self.commit(state);
        true
    }

    /// Removes `tag` from one user; the vocabulary is left alone.
    pub fn remove_tag_from_user(&self, id: &str, tag: &str) -> bool {
        let mut state = self.state();
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return false;
        };
        let Some(index) = user.tags.iter().position(|t| t == tag) else {
            return false;
        };
        user.tags.remove(index);
        self.commit(state);
        true
    }

    /// Registers `tag` in the vocabulary. Idempotent.
    pub fn add_tag(&self, tag: &str) -> bool {
        let mut state = self.state();
        if state.tags.iter().any(|t| t == tag) {
            return false;
        }
        state.tags.push(tag.to_string());
        self.commit(state);
        true
    }

    /// Deletes `tag` from the vocabulary and from every user.
    pub fn remove_tag(&self, tag: &str) -> bool {
        let mut state = self.state();
        if !state.tags.iter().any(|t| t == tag) {
            return false;
        }
        state.tags.retain(|t| t != tag);
        for user in state.users.iter_mut() {
            user.tags.retain(|t| t != tag);
        }
        self.commit(state);
        true
    }

    /// Renames `old` to `new` in the vocabulary and in every user, keeping
    /// each list position.
    ///
    /// Renaming onto a name that already exists merges the two: `new` takes
    /// the position `old` had and the other entry is dropped.
    pub fn update_tag(&self, old: &str, new: &str) -> bool {
        let mut state = self.state();
        let StoreState { users, tags, .. } = &mut *state;
        if !rename_entry(tags, old, new) {
            return false;
        }
        for user in users.iter_mut() {
            rename_entry(&mut user.tags, old, new);
        }
        self.commit(state);
        true
    }
}
