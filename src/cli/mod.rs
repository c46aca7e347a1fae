pub mod app;
pub mod commands;
pub mod ui;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use userdeck::AppConfig;

/// Browse, favorite and tag directory users from the terminal.
///
/// Settings fall back to USERDECK_* environment variables, then defaults.
#[derive(Debug, Parser)]
#[command(name = "userdeck", version, about)]
pub struct Args {
    /// Directory holding the persisted snapshot
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory API root
    #[arg(long)]
    pub source_url: Option<String>,

    /// Seed sent with every page request
    #[arg(long)]
    pub seed: Option<String>,

    /// Records per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Debounce quiet period in milliseconds
    #[arg(long)]
    pub quiet_ms: Option<u64>,

    /// Pages to fetch before the prompt opens
    #[arg(long, default_value_t = 0)]
    pub prefetch: u32,
}

impl Args {
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(source_url) = &self.source_url {
            config.source_url = source_url.clone();
        }
        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
        }
        if let Some(page_size) = self.page_size.filter(|size| *size > 0) {
            config.page_size = page_size;
        }
        if let Some(quiet_ms) = self.quiet_ms {
            config.quiet_period = Duration::from_millis(quiet_ms);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "userdeck",
            "--data-dir",
            "/tmp/elsewhere",
            "--page-size",
            "5",
            "--quiet-ms",
            "20",
        ]);
        let config = args.apply(AppConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.page_size, 5);
        assert_eq!(config.quiet_period, Duration::from_millis(20));
        assert_eq!(config.seed, AppConfig::default().seed);
    }

    #[test]
    fn test_zero_page_size_flag_ignored() {
        let args = Args::parse_from(["userdeck", "--page-size", "0"]);
        assert_eq!(args.apply(AppConfig::default()).page_size, 25);
    }
}
