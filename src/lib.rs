//! # Word Bazaar
//!
//! Deployment and lifecycle management for the word bazaar contract family on
//! æternity: a word registry, linear bonding curves, token sales, fungible
//! tokens and token votes.
//!
//! The chain itself is reached through a host-provided [`ContractSdk`]; this
//! library owns template specialization, instance caching and method dispatch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use word_bazaar::prelude::*;
//! use std::sync::Arc;
//!
//! async fn launch(sdk: Arc<dyn ContractSdk>) -> Result<(), Box<dyn std::error::Error>> {
//!     let bazaar = word_bazaar::open("bazaar.toml", sdk)?;
//!
//!     let launch = bazaar
//!         .launch_word_token(TokenLaunchParams {
//!             name: "Bazaar".to_string(),
//!             symbol: "BZR".to_string(),
//!             description: "word of the day".to_string(),
//!             timeout: 480,
//!             decimals: None,
//!         })
//!         .await?;
//!
//!     let supply = bazaar
//!         .fungible_token(launch.fungible_token)
//!         .total_supply()
//!         .await?;
//!     println!("supply: {supply}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - network, registry address and deploy options
//! - [`contracts`] - templates, instance cache, deployer and dispatcher

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::path::Path;
use std::sync::Arc;

// Re-export the public APIs of the member crates
pub use bazaar_config as config;
pub use bazaar_contracts as contracts;

pub use bazaar_contracts::{ContractSdk, WordBazaar};

/// Common imports for word bazaar hosts
pub mod prelude {
    pub use crate::config::{BazaarConfig, NetworkType};
    pub use crate::contracts::{
        BazaarError, CallOptions, ContractAddress, ContractInstance, ContractKind,
        ContractResult, ContractSdk, FungibleTokenParams, MethodCall, TokenLaunch,
        TokenLaunchParams, TokenSaleParams, TokenVotingParams, WordBazaar,
    };
}

/// Errors raised while setting up a [`WordBazaar`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Loads and validates the configuration at `path`, then builds a
/// [`WordBazaar`] bound to `sdk`.
pub fn open<P: AsRef<Path>>(path: P, sdk: Arc<dyn ContractSdk>) -> Result<WordBazaar> {
    let config = config::BazaarConfig::load(path)?;
    tracing::info!(
        network = %config.network,
        registry = %config.word_registry_address,
        "word bazaar configured"
    );
    Ok(WordBazaar::new(config, sdk))
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
