//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --products / --customers / --orders                                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     BAZAAR_PRODUCTS_PATH, BAZAAR_CUSTOMERS_PATH,                       │
//! │     BAZAAR_ORDERS_PATH, BAZAAR_MAX_RESULTS                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or                                                  │
//! │     ~/.config/bazaar/config.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bazaar.bazaar/config.toml (macOS)│
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     data/products.json, data/customers.json, data/orders.jsonl         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [data]
//! products_path = "data/products.json"
//! customers_path = "data/customers.json"
//! orders_path = "data/orders.jsonl"
//!
//! [search]
//! max_results = 10
//!
//! [session]
//! max_commit_attempts = 3
//! ```

use std::path::{Path, PathBuf};

use bazaar_store::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_PRODUCTS_PATH: &str = "BAZAAR_PRODUCTS_PATH";
pub const ENV_CUSTOMERS_PATH: &str = "BAZAAR_CUSTOMERS_PATH";
pub const ENV_ORDERS_PATH: &str = "BAZAAR_ORDERS_PATH";
pub const ENV_MAX_RESULTS: &str = "BAZAAR_MAX_RESULTS";

// =============================================================================
// Sections
// =============================================================================

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_products_path")]
    pub products_path: PathBuf,

    #[serde(default = "default_customers_path")]
    pub customers_path: PathBuf,

    #[serde(default = "default_orders_path")]
    pub orders_path: PathBuf,
}

fn default_products_path() -> PathBuf {
    PathBuf::from("data/products.json")
}

fn default_customers_path() -> PathBuf {
    PathBuf::from("data/customers.json")
}

fn default_orders_path() -> PathBuf {
    PathBuf::from("data/orders.jsonl")
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            products_path: default_products_path(),
            customers_path: default_customers_path(),
            orders_path: default_orders_path(),
        }
    }
}

/// Search output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Hits shown per search. Ranking itself is never truncated.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    10
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            max_results: default_max_results(),
        }
    }
}

/// Session behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Total append attempts before an order is given up.
    #[serde(default = "default_max_commit_attempts")]
    pub max_commit_attempts: u32,
}

fn default_max_commit_attempts() -> u32 {
    3
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            max_commit_attempts: default_max_commit_attempts(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    /// Flags are applied and the result validated by the caller.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("Cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes pretty TOML to `config_path` or the platform default.
    ///
    /// Returns the path written.
    pub fn save(&self, config_path: Option<&Path>) -> CliResult<PathBuf> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::config("No config path available"))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let paths = [
            ("products_path", &self.data.products_path),
            ("customers_path", &self.data.customers_path),
            ("orders_path", &self.data.orders_path),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(CliError::config(format!("{} must not be empty", name)));
            }
        }

        if self.search.max_results == 0 {
            return Err(CliError::config("max_results must be greater than 0"));
        }

        if self.session.max_commit_attempts == 0 {
            return Err(CliError::config(
                "max_commit_attempts must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Applies environment-style overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_PRODUCTS_PATH) {
            debug!(path = %path, "Overriding products path from environment");
            self.data.products_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_CUSTOMERS_PATH) {
            self.data.customers_path = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_ORDERS_PATH) {
            debug!(path = %path, "Overriding orders path from environment");
            self.data.orders_path = PathBuf::from(path);
        }

        if let Some(value) = lookup(ENV_MAX_RESULTS) {
            match value.parse::<usize>() {
                Ok(n) => self.search.max_results = n,
                Err(_) => warn!(value = %value, "Ignoring non-numeric {}", ENV_MAX_RESULTS),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bazaar", "bazaar")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Storage locations for `bazaar-store`.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            products_path: self.data.products_path.clone(),
            customers_path: self.data.customers_path.clone(),
            orders_path: self.data.orders_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data.orders_path, PathBuf::from("data/orders.jsonl"));
        assert_eq!(config.search.max_results, 10);
        assert_eq!(config.session.max_commit_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [search]
            max_results = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.data, DataSettings::default());
        assert_eq!(config.session.max_commit_attempts, 3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.search.max_results = 0;
        assert!(config.validate().is_err());

        config.search.max_results = 1;
        config.session.max_commit_attempts = 0;
        assert!(config.validate().is_err());

        config.session.max_commit_attempts = 1;
        config.data.orders_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_PRODUCTS_PATH, "/srv/products.json"),
            (ENV_MAX_RESULTS, "25"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.products_path, PathBuf::from("/srv/products.json"));
        assert_eq!(config.data.customers_path, default_customers_path());
        assert_eq!(config.search.max_results, 25);
    }

    #[test]
    fn test_bad_number_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == ENV_MAX_RESULTS).then(|| "lots".to_string()));
        assert_eq!(config.search.max_results, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.session.max_commit_attempts = 7;
        assert_eq!(config.save(Some(&path)).unwrap(), path);

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_store_config_mirrors_paths() {
        let config = AppConfig::default();
        let store = config.store_config();
        assert_eq!(store.products_path, config.data.products_path);
        assert_eq!(store.orders_path, config.data.orders_path);
    }
}
