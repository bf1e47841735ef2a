use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::controller::{StalePolicy, SyncSettings, MINI_CART_HIDE_AFTER};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storefront the cart routes are served from
    pub base_url: Url,
    pub currency_symbol: String,
    pub mini_cart_hide_after_ms: u64,
    pub stale_policy: StalePolicy,
    /// Cookie string standing in for `document.cookie`
    pub cookies: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"),
            currency_symbol: "₹".to_string(),
            mini_cart_hide_after_ms: MINI_CART_HIDE_AFTER.as_millis() as u64,
            stale_policy: StalePolicy::default(),
            cookies: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    /// Keys missing from the file keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn settings(&self) -> SyncSettings {
        SyncSettings {
            currency_symbol: self.currency_symbol.clone(),
            mini_cart_hide_after: Duration::from_millis(self.mini_cart_hide_after_ms),
            stale_policy: self.stale_policy,
        }
    }
}
