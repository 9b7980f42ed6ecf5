//! # Storefront Configuration
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. built-in defaults ([`StorefrontConfig::default`])
//! 2. a TOML file, from `--config` or `HARMONIC_BAKERY_CONFIG`
//! 3. the environment: `HARMONIC_BAKERY_STORAGE_DIR`, `HARMONIC_BAKERY_FORM_ENDPOINT`
//!
//! ```toml
//! storage_dir = "/var/lib/harmonic-bakery"
//! pickup_lead_hours = 48
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use crate::configure::FlowDelays;
use crate::order::{PickupPolicy, DEFAULT_FORM_ENDPOINT, DEFAULT_LEAD_HOURS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "HARMONIC_BAKERY_CONFIG";
pub const STORAGE_DIR_ENV: &str = "HARMONIC_BAKERY_STORAGE_DIR";
pub const FORM_ENDPOINT_ENV: &str = "HARMONIC_BAKERY_FORM_ENDPOINT";

pub const DEFAULT_CART_KEY: &str = "hb_cart";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Directory holding the cart snapshot.
    pub storage_dir: PathBuf,
    /// Snapshot key of the cart; also its file name (`<key>.json`).
    pub cart_key: String,
    pub form_endpoint: String,
    pub pickup_lead_hours: u32,
    pub auto_close_ms: u64,
    pub added_signal_ms: u64,
    /// Capacity of the cart actor's mailbox.
    pub mailbox_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            cart_key: DEFAULT_CART_KEY.to_string(),
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            pickup_lead_hours: DEFAULT_LEAD_HOURS,
            auto_close_ms: 1_000,
            added_signal_ms: 10_000,
            mailbox_capacity: 32,
        }
    }
}

/// `<data dir>/harmonic-bakery`, or `./.harmonic-bakery` where the platform has no data dir.
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("harmonic-bakery"))
        .unwrap_or_else(|| PathBuf::from(".harmonic-bakery"))
}

impl StorefrontConfig {
    /// Resolves the full configuration for this process.
    pub fn resolve(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies environment overrides read through `lookup`. Empty values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = set(STORAGE_DIR_ENV) {
            self.storage_dir = PathBuf::from(dir);
        }
        if let Some(endpoint) = set(FORM_ENDPOINT_ENV) {
            self.form_endpoint = endpoint;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "mailbox_capacity",
                reason: "must be at least 1".into(),
            });
        }
        let key_ok = !self.cart_key.is_empty()
            && self
                .cart_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !key_ok {
            return Err(ConfigError::Invalid {
                key: "cart_key",
                reason: format!("{:?} may only use letters, digits, '_' and '-'", self.cart_key),
            });
        }
        if !(self.form_endpoint.starts_with("http://") || self.form_endpoint.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                key: "form_endpoint",
                reason: format!("{:?} is not an http(s) URL", self.form_endpoint),
            });
        }
        Ok(())
    }

    pub fn pickup_policy(&self) -> PickupPolicy {
        PickupPolicy::from_hours(self.pickup_lead_hours)
    }

    pub fn flow_delays(&self) -> FlowDelays {
        FlowDelays {
            auto_close: Duration::from_millis(self.auto_close_ms),
            added_signal: Duration::from_millis(self.added_signal_ms),
        }
    }
}
