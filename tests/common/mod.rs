#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use userdeck::config::DEFAULT_STORAGE_KEY;
use userdeck::{
    DeckError, MemoryStorage, PersistenceGateway, Result, SourceGateway, StoreConfig, UserStore,
};

pub const KEY: &str = DEFAULT_STORAGE_KEY;

/// Source double serving canned pages, keyed by page number.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<HashMap<u32, Vec<Value>>>,
    failing: AtomicBool,
    requests: Mutex<Vec<(u32, u32)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch waits on `gate` before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_page(self, page: u32, records: Vec<Value>) -> Self {
        self.pages.lock().unwrap().insert(page, records);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// `(page, page_size)` of every request received.
    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceGateway for ScriptedSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Value>> {
        self.requests.lock().unwrap().push((page, page_size));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeckError::SourceUnavailable("connection refused".to_string()));
        }
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn raw_user(id: &str, first: &str, last: &str, gender: &str) -> Value {
    json!({
        "id": { "name": "SSN", "value": id },
        "name": { "title": "Mr", "first": first, "last": last },
        "email": format!("{}.{}@example.com", first, last),
        "gender": gender,
        "picture": {
            "large": format!("https://img.example.com/large/{}.jpg", id),
            "medium": format!("https://img.example.com/med/{}.jpg", id),
            "thumbnail": format!("https://img.example.com/thumb/{}.jpg", id)
        },
        "location": {
            "street": { "number": 12, "name": "Main Street" },
            "city": "Springfield",
            "state": "Oregon",
            "country": "United States",
            "postcode": 97477
        },
        "dob": { "date": "1990-01-01T00:00:00.000Z", "age": 34 },
        "phone": "555-0100"
    })
}

/// Record without a `name` section.
pub fn nameless_user(id: &str) -> Value {
    let mut record = raw_user(id, "x", "y", "female");
    record["name"] = Value::Null;
    record
}

/// Record whose `dob.age` does not fit the schema.
pub fn negative_age_user(id: &str) -> Value {
    let mut record = raw_user(id, "x", "y", "female");
    record["dob"]["age"] = json!(-1);
    record
}

pub fn build_store(
    source: ScriptedSource,
    config: StoreConfig,
) -> (Arc<UserStore>, Arc<ScriptedSource>, Arc<MemoryStorage>) {
    let source = Arc::new(source);
    let storage = Arc::new(MemoryStorage::new());
    let store = Arc::new(UserStore::with_config(
        source.clone(),
        storage.clone(),
        config,
    ));
    (store, source, storage)
}

pub fn store_with_page(records: Vec<Value>) -> (Arc<UserStore>, Arc<ScriptedSource>, Arc<MemoryStorage>) {
    build_store(ScriptedSource::new().with_page(1, records), StoreConfig::default())
}

/// A store already holding a standard cast of five users.
pub async fn populated_store() -> (Arc<UserStore>, Arc<ScriptedSource>, Arc<MemoryStorage>) {
    let fixture = store_with_page(vec![
        raw_user("1", "john", "doe", "male"),
        raw_user("2", "jane", "doe", "female"),
        raw_user("3", "alice", "smith", "female"),
        raw_user("4", "bob", "johnson", "male"),
        raw_user("5", "carol", "white", "female"),
    ]);
    fixture.0.fetch_next_page().await;
    fixture
}

pub fn persisted(storage: &MemoryStorage) -> serde_json::Value {
    storage.load(KEY).expect("snapshot persisted")
}
