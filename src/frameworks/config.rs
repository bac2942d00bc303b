use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

use crate::use_cases::FetchSettings;

// Runtime settings: optional TOML file first, then environment overrides.

pub const CONFIG_PATH_VAR: &str = "GUEST_LIST_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_base_url: String,
    pub session_cookie: Option<String>,
    pub page_size: u32,
    pub page_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub max_retries: u32,
    pub favorites_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.lu.ma".to_string(),
            session_cookie: None,
            page_size: 100,
            page_delay_ms: 10,
            request_timeout_ms: 10_000,
            max_retries: 0,
            favorites_path: PathBuf::from("favorites.json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Settings {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            // A zero page size would never make progress.
            page_size: self.page_size.max(1),
            page_delay: self.page_delay(),
            max_retries: self.max_retries,
        }
    }

    pub fn from_toml(text: &str, path: PathBuf) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Loads settings from the process environment.
pub fn load() -> Result<Settings, ConfigError> {
    load_from(|key| env::var(key).ok())
}

/// Loads settings using `lookup` in place of the environment.
pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, ConfigError> {
    let mut settings = match lookup(CONFIG_PATH_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            Settings::from_toml(&text, path)?
        }
        None => Settings::default(),
    };

    if let Some(url) = lookup("LUMA_API_URL") {
        settings.api_base_url = url;
    }
    if let Some(cookie) = lookup("LUMA_SESSION_COOKIE").filter(|c| !c.is_empty()) {
        settings.session_cookie = Some(cookie);
    }
    if let Some(path) = lookup("GUEST_LIST_FAVORITES_PATH") {
        settings.favorites_path = PathBuf::from(path);
    }
    override_number(&lookup, "GUEST_LIST_PAGE_SIZE", &mut settings.page_size);
    override_number(&lookup, "GUEST_LIST_PAGE_DELAY_MS", &mut settings.page_delay_ms);
    override_number(&lookup, "GUEST_LIST_TIMEOUT_MS", &mut settings.request_timeout_ms);
    override_number(&lookup, "GUEST_LIST_MAX_RETRIES", &mut settings.max_retries);

    Ok(settings)
}

// Unparseable values keep the previous setting.
fn override_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparseable setting."),
    }
}
