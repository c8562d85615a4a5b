use std::path::PathBuf;
use std::time::Duration;

use symbols_core::constants::DEFAULT_MAILBOX_CAPACITY;
use symbols_core::StoreConfig;

pub struct Config {
    pub store_latency: Duration,
    pub mailbox_capacity: usize,
    pub catalog_path: Option<PathBuf>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset or unparseable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let latency_ms: u64 = lookup("SYMBOLS_STORE_LATENCY_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        let mailbox_capacity: usize = lookup("SYMBOLS_MAILBOX_CAPACITY")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAILBOX_CAPACITY);
        let catalog_path = lookup("SYMBOLS_CATALOG_PATH")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let log_format = lookup("SYMBOLS_LOG_FORMAT").unwrap_or_else(|| "text".into());
        Self {
            store_latency: Duration::from_millis(latency_ms),
            mailbox_capacity,
            catalog_path,
            log_format,
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_latency(self.store_latency)
            .with_mailbox_capacity(self.mailbox_capacity)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
