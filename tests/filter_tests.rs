/// Filtered view and selection tests
///
/// Run with: cargo test --test filter_tests

mod common;

use common::*;
use userdeck::{Filters, User};

fn ids(users: &[User]) -> Vec<&str> {
    users.iter().map(|u| u.id.as_str()).collect()
}

#[tokio::test]
async fn test_relaxed_filters_return_everything() {
    let (store, _source, _storage) = populated_store().await;

    assert!(store.filters().is_relaxed());
    assert_eq!(store.filtered_users(), store.users());
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_full_name() {
    let (store, _source, _storage) = populated_store().await;

    store.set_search_text("DOE");
    assert_eq!(ids(&store.filtered_users()), vec!["1", "2"]);

    store.set_search_text("n d");
    assert_eq!(ids(&store.filtered_users()), vec!["1"]);

    store.set_search_text("john");
    assert_eq!(ids(&store.filtered_users()), vec!["1", "4"]);
}

#[tokio::test]
async fn test_gender_is_exact() {
    let (store, _source, _storage) = populated_store().await;

    store.set_gender(Some("female"));
    assert_eq!(ids(&store.filtered_users()), vec!["2", "3", "5"]);

    store.set_gender(Some("fem"));
    assert!(store.filtered_users().is_empty());

    store.set_gender(Some(""));
    assert_eq!(store.filtered_users().len(), 5);

    store.set_gender(None);
    assert_eq!(store.filtered_users().len(), 5);
}

#[tokio::test]
async fn test_favorites_only() {
    let (store, _source, _storage) = populated_store().await;
    store.toggle_favorite("3");
    store.toggle_favorite("5");

    store.set_favorites_only(true);

    assert_eq!(ids(&store.filtered_users()), vec!["3", "5"]);
}

#[tokio::test]
async fn test_criteria_combine_and_keep_order() {
    let (store, _source, _storage) = populated_store().await;
    store.toggle_favorite("2");
    store.toggle_favorite("4");
    store.toggle_favorite("5");

    store.set_filters(Filters {
        search_text: "o".to_string(),
        gender: Some("female".to_string()),
        favorites_only: true,
    });

    // jane doe and carol white are female favorites containing "o".
    assert_eq!(ids(&store.filtered_users()), vec!["2", "5"]);

    let all = store.users();
    let filtered = store.filtered_users();
    let mut positions = filtered
        .iter()
        .map(|f| all.iter().position(|u| u.id == f.id).unwrap());
    let mut last = positions.next().unwrap();
    for position in positions {
        assert!(position > last);
        last = position;
    }
}

#[tokio::test]
async fn test_view_tracks_mutations() {
    let (store, _source, _storage) = populated_store().await;
    store.set_favorites_only(true);
    assert!(store.filtered_users().is_empty());

    store.toggle_favorite("1");

    assert_eq!(ids(&store.filtered_users()), vec!["1"]);
}

#[tokio::test]
async fn test_filter_changes_mark_dirty_without_writing() {
    let (store, _source, storage) = populated_store().await;
    let writes = storage.write_count();
    assert!(!store.is_dirty());

    store.set_search_text("jo");

    assert!(store.is_dirty());
    assert_eq!(storage.write_count(), writes);

    store.persist_state();
    assert!(!store.is_dirty());

    let revision = store.revision();
    store.set_search_text("jo");
    assert_eq!(store.revision(), revision);
}

#[tokio::test]
async fn test_selection_is_unvalidated_and_tracks_collection() {
    let (store, _source, _storage) = populated_store().await;

    let outsider = User {
        id: "999".to_string(),
        first_name: "Nobody".to_string(),
        ..User::default()
    };
    store.set_selected_user(outsider.clone());
    assert_eq!(store.selected_user(), Some(outsider));

    store.set_selected_user(store.user("1").unwrap());
    store.toggle_favorite("1");
    assert!(store.selected_user().unwrap().is_favorite);

    store.clear_selected_user();
    assert_eq!(store.selected_user(), None);
}

#[tokio::test]
async fn test_selection_id_is_persisted() {
    let (store, _source, storage) = populated_store().await;

    store.set_selected_user(store.user("3").unwrap());
    store.persist_state();

    assert_eq!(persisted(&storage)["selectedUserId"], serde_json::json!("3"));
}

#[tokio::test]
async fn test_empty_selection_id_is_written_as_null() {
    let (store, _source, storage) = populated_store().await;

    store.set_selected_user(User::default());
    store.persist_state();

    assert!(store.selected_user().is_some());
    assert_eq!(persisted(&storage)["selectedUserId"], serde_json::Value::Null);
}
