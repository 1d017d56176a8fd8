//! Store configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Lifetime of a saved disclosure options entry (30 minutes).
pub const DEFAULT_OPTIONS_TTL: Duration = Duration::from_secs(30 * 60);

/// Environment variable overriding [`StoreConfig::options_ttl`], in seconds.
pub const ENV_OPTIONS_TTL_SECS: &str = "VERIKIT_OPTIONS_TTL_SECS";

/// Environment variable overriding [`StoreConfig::sweep_on_read`].
pub const ENV_SWEEP_ON_READ: &str = "VERIKIT_SWEEP_ON_READ";

/// Tunables for a [`crate::DisclosureStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// TTL applied by [`crate::DisclosureStore::set_options`].
    #[serde(rename = "options_ttl_secs", with = "duration_secs")]
    pub options_ttl: Duration,
    /// Whether reads physically remove expired options entries they come across.
    ///
    /// Expired entries are invisible either way.
    pub sweep_on_read: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            options_ttl: DEFAULT_OPTIONS_TTL,
            sweep_on_read: true,
        }
    }
}

impl StoreConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] if the document is not valid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a configuration from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] if a variable is set to an
    /// unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_OPTIONS_TTL_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_OPTIONS_TTL_SECS,
                value: raw.clone(),
            })?;
            config.options_ttl = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_SWEEP_ON_READ) {
            config.sweep_on_read = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: ENV_SWEEP_ON_READ,
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
