//! On-storage snapshot layout.
//!
//! A snapshot is one JSON object with `filters`, `users`, `tags` and
//! `selectedUserId`. It is written from borrowed store state through
//! [`SnapshotView`] and read back leniently through [`PersistedSnapshot`],
//! which tolerates absent sections and partially present filters.

use crate::core::{Filters, User};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView<'a> {
    pub filters: &'a Filters,
    pub users: &'a [User],
    pub tags: &'a [String],
    pub selected_user_id: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    #[serde(default)]
    pub filters: Option<PersistedFilters>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub selected_user_id: Option<String>,
}

/// Filters as found in storage; each field restores only if present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFilters {
    #[serde(default)]
    pub search_text: Option<String>,
    /// Outer `None`: field absent. `Some(None)`: explicitly null.
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default)]
    pub favorites_only: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PersistedFilters {
    pub fn apply_to(self, filters: &mut Filters) {
        if let Some(search_text) = self.search_text {
            filters.search_text = search_text;
        }
        if let Some(gender) = self.gender {
            filters.gender = gender;
        }
        if let Some(favorites_only) = self.favorites_only {
            filters.favorites_only = favorites_only;
        }
    }
}

/// Favorite flag and tags carried over from a persisted user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub is_favorite: bool,
    pub tags: Vec<String>,
}

impl PersistedSnapshot {
    /// Persisted annotations keyed by user id; the first record wins when an
    /// id repeats.
    pub fn annotations(&self) -> HashMap<&str, Annotation> {
        let mut by_id = HashMap::new();
        for user in self.users.iter().flatten() {
            by_id.entry(user.id.as_str()).or_insert_with(|| Annotation {
                is_favorite: user.is_favorite,
                tags: user.tags.clone(),
            });
        }
        by_id
    }

    /// The persisted selection id, ignoring an empty string.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_user_id.as_deref().filter(|id| !id.is_empty())
    }
}
