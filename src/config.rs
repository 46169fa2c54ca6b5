use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::data::models::ClientError;
use crate::data::repositories::{DEFAULT_HISTORY_LIMIT, FileBackend, StorageClient};
use crate::data::{DEFAULT_NEWS_COUNT, HttpDictionaryClient};
use crate::features::search::{DEFAULT_DEBOUNCE, SessionOptions};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_STORE_PATH: &str = "cedict_store.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
// roughly what browsers grant one origin
pub const DEFAULT_STORE_QUOTA: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub store_path: PathBuf,
    pub store_quota: usize,
    pub debounce: Duration,
    pub news_count: usize,
    pub timeout: Duration,
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_quota: DEFAULT_STORE_QUOTA,
            debounce: DEFAULT_DEBOUNCE,
            news_count: DEFAULT_NEWS_COUNT,
            timeout: DEFAULT_TIMEOUT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

impl AppConfig {
    /// Reads `.env` (if any) and the `CEDICT_*` environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: lookup("CEDICT_API_BASE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base),
            store_path: lookup("CEDICT_STORE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            store_quota: parse_or(&lookup, "CEDICT_STORE_QUOTA", defaults.store_quota),
            debounce: Duration::from_millis(parse_or(
                &lookup,
                "CEDICT_DEBOUNCE_MS",
                defaults.debounce.as_millis() as u64,
            )),
            news_count: parse_or(&lookup, "CEDICT_NEWS_COUNT", defaults.news_count),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "CEDICT_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
            history_limit: parse_or(&lookup, "CEDICT_HISTORY_LIMIT", defaults.history_limit),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            debounce: self.debounce,
            news_count: self.news_count,
            history_limit: self.history_limit,
        }
    }

    pub fn storage(&self) -> StorageClient {
        StorageClient::new(FileBackend::new(&self.store_path).with_quota(self.store_quota))
    }

    pub fn client(&self) -> Result<HttpDictionaryClient, ClientError> {
        HttpDictionaryClient::new(&self.api_base, self.timeout)
    }
}
