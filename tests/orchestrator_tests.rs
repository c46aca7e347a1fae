/// Debounced persistence tests
///
/// Time is paused, so sleeps advance the clock deterministically.
/// Run with: cargo test --test orchestrator_tests

mod common;

use common::*;
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;
use userdeck::{OrchestratorConfig, PersistenceOrchestrator};

fn quiet(ms: u64) -> OrchestratorConfig {
    OrchestratorConfig::new().quiet_period(Duration::from_millis(ms))
}

#[tokio::test(start_paused = true)]
async fn test_activation_restores_and_hydrates() {
    let (store, _source, storage) = store_with_page(vec![]);
    storage.insert_raw(KEY, r#"{"tags":["vip"],"filters":{"searchText":"jo"}}"#);

    let orchestrator = PersistenceOrchestrator::activate(store.clone(), OrchestratorConfig::default());

    assert!(store.is_hydrated());
    assert_eq!(store.tags(), vec!["vip"]);
    assert_eq!(store.filters().search_text, "jo");
    orchestrator.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_activation_survives_unreadable_snapshot() {
    let (store, _source, storage) = store_with_page(vec![]);
    storage.insert_raw(KEY, r#"{"tags":42}"#);

    let orchestrator = PersistenceOrchestrator::activate(store.clone(), OrchestratorConfig::default());

    assert!(store.is_hydrated());
    assert!(store.tags().is_empty());
    orchestrator.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_changes_within_quiet_period_collapse() {
    let (store, _source, storage) = store_with_page(vec![]);
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(1000));

    store.set_search_text("j");
    sleep(Duration::from_millis(500)).await;
    store.set_search_text("jo");
    sleep(Duration::from_millis(500)).await;
    store.set_search_text("joh");

    // 1000ms after the first change, but only 0ms after the last.
    assert_eq!(storage.write_count(), 0);

    sleep(Duration::from_millis(900)).await;
    assert_eq!(storage.write_count(), 0);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(storage.write_count(), 1);
    assert_eq!(persisted(&storage)["filters"]["searchText"], json!("joh"));
    assert!(!store.is_dirty());

    orchestrator.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_each_quiet_window_persists_once() {
    let (store, _source, storage) = store_with_page(vec![]);
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(100));

    store.set_gender(Some("male"));
    sleep(Duration::from_millis(150)).await;
    assert_eq!(storage.write_count(), 1);

    store.set_favorites_only(true);
    store.set_gender(None);
    sleep(Duration::from_millis(150)).await;
    assert_eq!(storage.write_count(), 2);
    assert_eq!(
        persisted(&storage)["filters"],
        json!({ "searchText": "", "gender": null, "favoritesOnly": true })
    );

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(storage.write_count(), 2);

    orchestrator.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_no_redundant_write_after_direct_persist() {
    let (store, _source, storage) = populated_store().await;
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(1000));
    let writes = storage.write_count();

    store.toggle_favorite("1");
    assert_eq!(storage.write_count(), writes + 1);

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(storage.write_count(), writes + 1);

    orchestrator.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_flushes_pending_changes() {
    let (store, _source, storage) = store_with_page(vec![]);
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(1000));

    store.set_search_text("pending");
    sleep(Duration::from_millis(10)).await;
    assert_eq!(storage.write_count(), 0);

    orchestrator.shutdown().await.unwrap();

    assert_eq!(storage.write_count(), 1);
    assert_eq!(persisted(&storage)["filters"]["searchText"], json!("pending"));
    assert!(!store.is_dirty());

    // The debounce task is gone.
    store.set_search_text("after");
    sleep(Duration::from_millis(5000)).await;
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_flushes_pending_changes() {
    let (store, _source, storage) = store_with_page(vec![]);
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(1000));

    store.set_gender(Some("female"));
    drop(orchestrator);

    assert_eq!(storage.write_count(), 1);
    assert_eq!(persisted(&storage)["filters"]["gender"], json!("female"));
}

#[tokio::test(start_paused = true)]
async fn test_flush_now_bypasses_quiet_period() {
    let (store, _source, storage) = store_with_page(vec![]);
    let orchestrator = PersistenceOrchestrator::activate(store.clone(), quiet(1000));

    store.set_favorites_only(true);
    orchestrator.flush_now();
    assert_eq!(storage.write_count(), 1);

    // Nothing left for the timer to do.
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(storage.write_count(), 1);

    orchestrator.shutdown().await.unwrap();
}
