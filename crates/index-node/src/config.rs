//! # Node Configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LI_OWNER` | `owner` |
//! | `LI_TREASURY` | `treasury` |
//! | `LI_RESULT_STORE` | `result_store` |
//! | `LI_LOG_LEVEL` | `telemetry.log_level` |
//! | `LI_JSON_LOGS` | `telemetry.json_logs` |
//!
//! ```toml
//! owner = "0x000000000000000000000000000000000000000f"
//! treasury = "0x00000000000000000000000000000000000000ee"
//! result_store = "0x000000000000000000000000000000000000005e"
//!
//! [metering]
//! basic_fee = 100000
//! rate_limit_per_slot = 10
//!
//! [telemetry]
//! log_level = "debug"
//!
//! [[genesis_balances]]
//! account = "0x00000000000000000000000000000000000000a1"
//! amount = 50000000
//! ```

use li_01_indexer_registry::{RegistryConfig, MAX_REPUTATION};
use li_03_ingestion::IngestionConfig;
use li_04_query_metering::MeteringConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, Identity};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Development owner, used when neither file nor environment names one.
pub const DEFAULT_OWNER: Identity = Identity::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0F,
]);

/// Development treasury.
pub const DEFAULT_TREASURY: Identity = Identity::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xEE,
]);

/// Development result store, the only cache writer.
pub const DEFAULT_RESULT_STORE: Identity = Identity::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x5E,
]);

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Environment variable holds an unusable value.
    #[error("invalid value for {var}: {value}")]
    InvalidOverride { var: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Initial ledger balance for the in-memory ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub account: Identity,
    pub amount: Amount,
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Identity allowed to run administrative operations.
    pub owner: Identity,
    /// Account receiving bonds and query fees.
    pub treasury: Identity,
    /// External store allowed to populate the query cache.
    pub result_store: Identity,
    pub registry: RegistryConfig,
    pub ingestion: IngestionConfig,
    pub metering: MeteringConfig,
    pub telemetry: TelemetryConfig,
    pub genesis_balances: Vec<GenesisBalance>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER,
            treasury: DEFAULT_TREASURY,
            result_store: DEFAULT_RESULT_STORE,
            registry: RegistryConfig::default(),
            ingestion: IngestionConfig::default(),
            metering: MeteringConfig::default(),
            telemetry: TelemetryConfig::default(),
            genesis_balances: Vec::new(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing fields take defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `LI_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply `LI_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("LI_OWNER") {
            self.owner = value.parse().map_err(|_| ConfigError::InvalidOverride {
                var: "LI_OWNER",
                value,
            })?;
        }
        if let Some(value) = lookup("LI_TREASURY") {
            self.treasury = value.parse().map_err(|_| ConfigError::InvalidOverride {
                var: "LI_TREASURY",
                value,
            })?;
        }
        if let Some(value) = lookup("LI_RESULT_STORE") {
            self.result_store = value.parse().map_err(|_| ConfigError::InvalidOverride {
                var: "LI_RESULT_STORE",
                value,
            })?;
        }
        if let Some(value) = lookup("LI_LOG_LEVEL") {
            self.telemetry.log_level = value;
        }
        if let Some(value) = lookup("LI_JSON_LOGS") {
            self.telemetry.json_logs = match value.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        var: "LI_JSON_LOGS",
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    /// Reject settings that would leave the service unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metering.rate_limit_per_slot == 0 {
            return Err(ConfigError::Invalid("rate_limit_per_slot must be > 0".into()));
        }
        if self.metering.max_results == 0 {
            return Err(ConfigError::Invalid("max_results must be > 0".into()));
        }
        if self.metering.cache_lifetime == 0 {
            return Err(ConfigError::Invalid("cache_lifetime must be > 0".into()));
        }
        if self.metering.cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache_capacity must be > 0".into()));
        }
        if self.registry.max_reputation > MAX_REPUTATION {
            return Err(ConfigError::Invalid(format!(
                "max_reputation must be <= {MAX_REPUTATION}"
            )));
        }
        if self.registry.initial_reputation > self.registry.max_reputation {
            return Err(ConfigError::Invalid(
                "initial_reputation must be <= max_reputation".into(),
            ));
        }
        if self.ingestion.max_batch_size == 0 {
            return Err(ConfigError::Invalid("max_batch_size must be > 0".into()));
        }
        if self.owner == self.treasury {
            return Err(ConfigError::Invalid("owner and treasury must differ".into()));
        }
        Ok(())
    }
}
