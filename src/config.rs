//! Runtime configuration.
//!
//! Defaults plus environment overrides. Nothing is read from disk.

use thiserror::Error;

/// Environment variable holding a fixed RNG seed.
pub const SEED_VAR: &str = "TWENTY48_SEED";

/// Environment variable holding the tracing filter directive.
pub const LOG_VAR: &str = "TWENTY48_LOG";

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed. `None` means derive one from the clock at startup.
    pub seed: Option<u64>,
    /// Tracing filter, e.g. "warn" or "twenty48=debug".
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: "warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Seed override is not a u64.
    #[error("{var} must be an unsigned 64-bit integer, got {value:?}")]
    InvalidSeed {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

impl GameConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_VAR).filter(|v| !v.trim().is_empty()) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed {
                    var: SEED_VAR,
                    value: raw.clone(),
                })?;
            config.seed = Some(seed);
        }

        if let Some(filter) = lookup(LOG_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }

        Ok(config)
    }
}
