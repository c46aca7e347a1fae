use crate::core::{DeckError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_STORAGE_KEY: &str = "userPreferences";
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);
pub const DEFAULT_FETCH_ERROR_MESSAGE: &str = "Failed to fetch users. Please try again later.";

pub const DEFAULT_SOURCE_URL: &str = "https://randomuser.me/api";
pub const DEFAULT_SEED: &str = "nuxt-app";
pub const DEFAULT_DATA_DIR: &str = ".userdeck";

/// What a page fetch does with a raw record that cannot become a [`crate::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRecordPolicy {
    /// The whole page fails together.
    #[default]
    FailPage,
    /// Bad records are logged and dropped, the rest of the page is kept.
    SkipRecord,
}

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Records requested per page
    pub page_size: u32,

    /// Key the snapshot is saved under
    pub storage_key: String,

    pub malformed_records: MalformedRecordPolicy,

    /// Message surfaced on the store when a fetch fails
    pub fetch_error_message: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            malformed_records: MalformedRecordPolicy::default(),
            fetch_error_message: DEFAULT_FETCH_ERROR_MESSAGE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the snapshot key
    pub fn storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Set the malformed record policy
    pub fn malformed_records(mut self, policy: MalformedRecordPolicy) -> Self {
        self.malformed_records = policy;
        self
    }

    /// Set the user-facing fetch failure message
    pub fn fetch_error_message(mut self, message: &str) -> Self {
        self.fetch_error_message = message.to_string();
        self
    }
}

/// Persistence orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Time without changes before a debounced persist runs
    pub quiet_period: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quiet period
    pub fn quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }
}

/// Process-level configuration for the `userdeck` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub source_url: String,
    pub seed: String,
    pub page_size: u32,
    pub quiet_period: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            seed: DEFAULT_SEED.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size = match lookup("USERDECK_PAGE_SIZE") {
            Some(raw) => parse_number::<u32>("USERDECK_PAGE_SIZE", &raw)?,
            None => defaults.page_size,
        };
        if page_size == 0 {
            return Err(DeckError::ConfigError(
                "USERDECK_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        let quiet_period = match lookup("USERDECK_QUIET_PERIOD_MS") {
            Some(raw) => Duration::from_millis(parse_number::<u64>("USERDECK_QUIET_PERIOD_MS", &raw)?),
            None => defaults.quiet_period,
        };

        Ok(Self {
            data_dir: lookup("USERDECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            source_url: lookup("USERDECK_SOURCE_URL").unwrap_or(defaults.source_url),
            seed: lookup("USERDECK_SEED").unwrap_or(defaults.seed),
            page_size,
            quiet_period,
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new().page_size(self.page_size)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig::new().quiet_period(self.quiet_period)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        DeckError::ConfigError(format!("{} must be a non-negative integer, got '{}'", key, raw))
    })
}
