//! Application configuration management.
//!
//! This module handles loading the application configuration: the roster
//! endpoint, request timeout, resize debounce window and the width
//! breakpoints that decide how many columns the roster uses.
//!
//! Configuration is stored at `~/.config/rollcall/config.json`. The
//! `ROLLCALL_ENDPOINT` environment variable overrides the endpoint.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Preferences file name (display options)
const PREFS_FILE: &str = "preferences.json";

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV_VAR: &str = "ROLLCALL_ENDPOINT";

/// Requests that take longer than this are abandoned.
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Resize events closer together than this are coalesced.
const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Terminal width (cells) at which the roster switches to two columns.
const DEFAULT_MEDIUM_MIN_WIDTH: u16 = 80;

/// Terminal width (cells) at which the roster switches to three columns.
const DEFAULT_WIDE_MIN_WIDTH: u16 = 120;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub endpoint_url: Option<String>,
    pub request_timeout_ms: u64,
    pub resize_debounce_ms: u64,
    pub medium_min_width: u16,
    pub wide_min_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            medium_min_width: DEFAULT_MEDIUM_MIN_WIDTH,
            wide_min_width: DEFAULT_WIDE_MIN_WIDTH,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::from_env());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_override(std::env::var(ENDPOINT_ENV_VAR).ok());
        Ok(config)
    }

    /// Defaults plus environment overrides, for when the config file is
    /// missing or unusable.
    pub fn from_env() -> Self {
        Self::defaults_with_override(std::env::var(ENDPOINT_ENV_VAR).ok())
    }

    fn defaults_with_override(endpoint: Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_env_override(endpoint);
        config
    }

    fn apply_env_override(&mut self, endpoint: Option<String>) {
        if let Some(url) = endpoint.filter(|u| !u.trim().is_empty()) {
            self.endpoint_url = Some(url.trim().to_string());
        }
    }

    /// The configured endpoint, or an error suitable for display.
    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| anyhow::anyhow!("endpoint URL is not set. Set {} or add endpoint_url to {}", ENDPOINT_ENV_VAR, CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Number of roster columns for a display `width` in cells.
    pub fn column_count_for_width(&self, width: u16) -> usize {
        if width >= self.wide_min_width {
            3
        } else if width >= self.medium_min_width {
            2
        } else {
            1
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn prefs_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(PREFS_FILE))
    }

    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.resize_debounce(), Duration::from_millis(100));
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"endpoint_url":"https://example.test/exec"}"#).unwrap();
        assert_eq!(config.endpoint().unwrap(), "https://example.test/exec");
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(config.wide_min_width, DEFAULT_WIDE_MIN_WIDTH);
    }

    #[test]
    fn test_env_override() {
        let mut config = Config {
            endpoint_url: Some("https://file.test".to_string()),
            ..Config::default()
        };
        config.apply_env_override(Some("  ".to_string()));
        assert_eq!(config.endpoint().unwrap(), "https://file.test");
        config.apply_env_override(Some(" https://env.test ".to_string()));
        assert_eq!(config.endpoint().unwrap(), "https://env.test");
    }

    #[test]
    fn test_defaults_with_override() {
        let config = Config::defaults_with_override(Some("https://env.test/exec".to_string()));
        assert_eq!(config.endpoint().unwrap(), "https://env.test/exec");
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);

        assert!(Config::defaults_with_override(None).endpoint().is_err());
    }

    #[test]
    fn test_blank_endpoint_is_error() {
        let config = Config {
            endpoint_url: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn test_column_count_for_width() {
        let config = Config::default();
        assert_eq!(config.column_count_for_width(40), 1);
        assert_eq!(config.column_count_for_width(79), 1);
        assert_eq!(config.column_count_for_width(80), 2);
        assert_eq!(config.column_count_for_width(119), 2);
        assert_eq!(config.column_count_for_width(120), 3);
        assert_eq!(config.column_count_for_width(300), 3);
    }
}
