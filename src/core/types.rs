use serde::{Deserialize, Serialize};

/// A directory record as held by the store.
///
/// `is_favorite` and `tags` are annotations owned by this crate; every other
/// field comes from the source directory. Field names serialize in camelCase
/// so snapshots keep the established on-storage layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub thumbnail: String,
    pub picture: String,
    pub location: Location,
    pub age: u32,
    pub phone: String,
    pub is_favorite: bool,
    pub tags: Vec<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub country: String,
    pub city: String,
    /// Single line, `"{number} {name}"`.
    pub street: String,
    pub postcode: String,
}

/// Conjunctive filter over the user collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub search_text: String,
    pub gender: Option<String>,
    pub favorites_only: bool,
}

impl Filters {
    /// Every clause relaxes to "always true" when its criterion is empty,
    /// unset or false. An empty gender string counts as unset.
    pub fn matches(&self, user: &User) -> bool {
        self.matches_search(user) && self.matches_gender(user) && self.matches_favorites(user)
    }

    pub fn is_relaxed(&self) -> bool {
        self.search_text.is_empty() && self.active_gender().is_none() && !self.favorites_only
    }

    fn matches_search(&self, user: &User) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        user.full_name()
            .to_lowercase()
            .contains(&self.search_text.to_lowercase())
    }

    fn matches_gender(&self, user: &User) -> bool {
        match self.active_gender() {
            Some(gender) => user.gender == gender,
            None => true,
        }
    }

    fn matches_favorites(&self, user: &User) -> bool {
        !self.favorites_only || user.is_favorite
    }

    fn active_gender(&self) -> Option<&str> {
        self.gender.as_deref().filter(|g| !g.is_empty())
    }
}
