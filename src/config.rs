//! Console configuration: backend location, page size, request timeout.
//!
//! Resolution order is defaults, then `~/.datainsight/config.json`, then
//! environment (`DATAINSIGHT_API_BASE`, `DATAINSIGHT_PAGE_SIZE`). The CLI
//! applies its own flags last.

use crate::types::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "DATAINSIGHT_API_BASE";
pub const ENV_PAGE_SIZE: &str = "DATAINSIGHT_PAGE_SIZE";

/// Query console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend base URL (e.g. `http://localhost:8000`)
    pub base_url: String,

    /// Rows per rendered page
    pub page_size: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConsoleConfig {
    /// Get default config directory (~/.datainsight/).
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ConsoleError::config("HOME not set"))?;
        Ok(PathBuf::from(home).join(".datainsight"))
    }

    /// Get config file path (~/.datainsight/config.json).
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load defaults, the user config file, then environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file() {
            Ok(path) => Self::load_from(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ConsoleConfig = serde_json::from_str(&content)
            .map_err(|e| ConsoleError::config(format!("Invalid config {}: {}", path.display(), e)))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded console config");
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Save configuration to ~/.datainsight/config.json.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            self.page_size = raw.trim().parse().map_err(|_| {
                ConsoleError::config(format!("{} must be a positive integer, got '{}'", ENV_PAGE_SIZE, raw))
            })?;
        }

        Ok(())
    }

    /// Reject settings the console cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConsoleError::config("page_size must be at least 1"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConsoleError::config("base_url must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConsoleError::config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Join an endpoint path onto the base URL, ignoring trailing slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_join() {
        let mut config = ConsoleConfig::default();
        assert_eq!(config.endpoint("/nl2sql"), "http://localhost:8000/nl2sql");

        config.base_url = "http://db.internal:9000/api/".to_string();
        assert_eq!(config.endpoint("query"), "http://db.internal:9000/api/query");
        assert_eq!(config.endpoint("/"), "http://db.internal:9000/api/");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ConsoleConfig {
            base_url: "https://insight.example.com".to_string(),
            page_size: 25,
            timeout_secs: 5,
        };
        config.save_to(&path).unwrap();

        let loaded = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let loaded = ConsoleConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, ConsoleConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 50}"#).unwrap();

        let loaded = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(loaded.page_size, 50);
        assert_eq!(loaded.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"page_size": 0}"#).unwrap();

        let err = ConsoleConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://10.0.0.5:8000"),
            (ENV_PAGE_SIZE, "20"),
        ]
        .into_iter()
        .collect();

        let mut config = ConsoleConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_env_bad_page_size() {
        let mut config = ConsoleConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_PAGE_SIZE).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("DATAINSIGHT_PAGE_SIZE"));
    }
}
