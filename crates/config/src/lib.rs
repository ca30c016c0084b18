//! Word Bazaar Configuration Module
//!
//! This module provides configuration types for the contract orchestration layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Address of the deployed word registry all fungible tokens are registered with
pub const WORD_REGISTRY_ADDRESS: &str = "ct_zPka9jyqrRdRQX3XuZEMsdzydcRvULVWFqRpqgZmTb1EszfQT";

/// Prefix every contract address on the target chain carries
pub const CONTRACT_ADDRESS_PREFIX: &str = "ct_";

/// Decimal precision used for tokens when the host does not pick one
pub const DEFAULT_DECIMALS: u32 = 18;
/// Largest decimal precision accepted for template scaling
pub const MAX_DECIMALS: u32 = 77;

/// Network type for the target chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NetworkType {
    MainNet,
    #[default]
    TestNet,
    Private,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::Private => write!(f, "private"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "private" | "devnet" => Ok(NetworkType::Private),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Orchestration layer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BazaarConfig {
    pub network: NetworkType,
    /// The word registry singleton every lookup and token registration targets.
    pub word_registry_address: String,
    pub default_decimals: u32,
    /// Call options attached to every contract deployment (gas, fee, ...).
    pub deploy_options: Map<String, Value>,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::TestNet,
            word_registry_address: WORD_REGISTRY_ADDRESS.to_string(),
            default_decimals: DEFAULT_DECIMALS,
            deploy_options: Map::new(),
        }
    }
}

impl BazaarConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: BazaarConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_word_registry_address<S: Into<String>>(mut self, address: S) -> Self {
        self.word_registry_address = address.into();
        self
    }

    pub fn with_deploy_option<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.deploy_options.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let address = self.word_registry_address.trim();
        if address.len() <= CONTRACT_ADDRESS_PREFIX.len()
            || !address.starts_with(CONTRACT_ADDRESS_PREFIX)
        {
            return Err(ConfigError::Invalid(format!(
                "word registry address must be a {}-prefixed contract id, got {:?}",
                CONTRACT_ADDRESS_PREFIX, self.word_registry_address
            )));
        }
        if self.default_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "default decimals {} exceeds maximum of {}",
                self.default_decimals, MAX_DECIMALS
            )));
        }
        Ok(())
    }
}
