//! Generator configuration.
//!
//! Configuration is a JSON document; every field is optional:
//!
//! ```json
//! {
//!   "sets_dir": "sets",
//!   "default_set": "set1",
//!   "key": "",
//!   "size": [200, 200],
//!   "min_choice_bits": 12.0,
//!   "parallel_fetch": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLimits;
use crate::digest::PUBLIC_KEY;
use crate::error::{ConfigurationError, RobohashError};
use crate::provider::is_plain_set_name;

/// Environment variable that overrides the configured secret key.
pub const KEY_ENV_VAR: &str = "ROBOHASH_KEY";

/// Smallest accepted output side, in pixels.
pub const MIN_SIDE: u32 = 10;
/// Largest accepted output side, in pixels.
pub const MAX_SIDE: u32 = 999;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobohashConfig {
    /// Root directory holding one subdirectory per part set.
    pub sets_dir: PathBuf,
    /// Set used when a request names none.
    pub default_set: String,
    /// HMAC key mixed into every digest.
    pub key: String,
    /// Default output size `[width, height]`.
    pub size: [u32; 2],
    /// Minimum bits of choice a set must offer; `null` disables the check.
    pub min_choice_bits: Option<f64>,
    /// Fetch and decode part images concurrently.
    pub parallel_fetch: bool,
}

impl Default for RobohashConfig {
    fn default() -> Self {
        Self {
            sets_dir: PathBuf::from("sets"),
            default_set: "set1".to_string(),
            key: PUBLIC_KEY.to_string(),
            size: [200, 200],
            min_choice_bits: Some(CatalogLimits::DEFAULT_MIN_CHOICE_BITS),
            parallel_fetch: true,
        }
    }
}

impl RobohashConfig {
    /// Parses a config from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, RobohashError> {
        let config: RobohashConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, RobohashError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, RobohashError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !is_plain_set_name(&self.default_set) {
            return Err(ConfigurationError::InvalidConfig(format!(
                "default_set '{}' is not a plain set name",
                self.default_set
            )));
        }
        for side in self.size {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(ConfigurationError::InvalidConfig(format!(
                    "size {}x{} out of range, each side must be {}..={}",
                    self.size[0], self.size[1], MIN_SIDE, MAX_SIDE
                )));
            }
        }
        if let Some(bits) = self.min_choice_bits {
            if !bits.is_finite() || bits < 0.0 {
                return Err(ConfigurationError::InvalidConfig(format!(
                    "min_choice_bits must be a non-negative number, got {}",
                    bits
                )));
            }
        }
        Ok(())
    }

    /// Applies `ROBOHASH_KEY` from the environment if set.
    pub fn with_env_key(mut self) -> Self {
        if let Ok(key) = std::env::var(KEY_ENV_VAR) {
            self.key = key;
        }
        self
    }

    /// Catalog limits derived from this config.
    pub fn catalog_limits(&self) -> CatalogLimits {
        CatalogLimits::default().with_min_choice_bits(self.min_choice_bits)
    }
}
