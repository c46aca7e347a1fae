// ============================================================================
// Userdeck Library
// ============================================================================

pub mod config;
pub mod core;
pub mod orchestrator;
pub mod source;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::{AppConfig, MalformedRecordPolicy, OrchestratorConfig, StoreConfig};
pub use core::{DeckError, Filters, Location, Result, User};
pub use orchestrator::PersistenceOrchestrator;
pub use source::{RandomUserSource, RawRecord, SourceConfig, SourceGateway};
pub use storage::{FileStorage, MemoryStorage, PersistenceGateway};
pub use store::{FetchOutcome, UserStore};

// ============================================================================
// Wiring
// ============================================================================

/// Builds a store over the RandomUser directory and a file-backed snapshot,
/// restores it and starts debounced persistence.
///
/// # Examples
///
/// ```no_run
/// use userdeck::{AppConfig, FetchOutcome};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = userdeck::open(&AppConfig::default())?;
/// let store = orchestrator.store().clone();
///
/// if let FetchOutcome::Fetched { count } = store.fetch_next_page().await {
///     println!("loaded {} users", count);
/// }
/// store.set_search_text("john");
/// println!("{} match", store.filtered_users().len());
///
/// orchestrator.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub fn open(config: &AppConfig) -> Result<PersistenceOrchestrator> {
    let storage = std::sync::Arc::new(FileStorage::open(&config.data_dir)?);
    let source = std::sync::Arc::new(RandomUserSource::new(
        SourceConfig::new()
            .base_url(&config.source_url)
            .seed(&config.seed),
    )?);
    let store = std::sync::Arc::new(UserStore::with_config(
        source,
        storage,
        config.store_config(),
    ));
    Ok(PersistenceOrchestrator::activate(
        store,
        config.orchestrator_config(),
    ))
}
