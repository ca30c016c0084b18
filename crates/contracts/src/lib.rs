//! # Bazaar Contracts
//!
//! Lifecycle management for the word bazaar contract family: a word registry
//! singleton, bonding curves, token sales, fungible tokens and token votes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              WordBazaar                  │
//! │  ┌──────────────────┐ ┌────────────────┐│
//! │  │ ContractDeployer │ │MethodDispatcher││
//! │  │ (template patch) │ │ (lazy lookup)  ││
//! │  └────────┬─────────┘ └───────┬────────┘│
//! │           └──► InstanceCache ◄┘         │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        ContractSdk (external)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! - **Decimals**: exact `amount × 10^precision` scaling
//! - **Templates**: bundled sources and exact-literal decimal patching
//! - **InstanceCache**: single-flight, never-evicting handle cache
//! - **ContractDeployer**: patch, compile, deploy, register
//! - **MethodDispatcher**: resolve through the cache, call, unwrap the decoded result
//!
//! ## Example
//!
//! ```rust
//! use bazaar_contracts::{decimals::scale, SourceTemplate, ContractKind};
//!
//! assert_eq!(scale(1, 18).to_string(), "1000000000000000000");
//!
//! let source = SourceTemplate::bundled(ContractKind::TokenSale)
//!     .specialize(Some(18))
//!     .unwrap();
//! assert!(source.contains("let decimals = 1000000000000000000"));
//! ```

pub mod bazaar;
pub mod cache;
pub mod decimals;
pub mod deployer;
pub mod dispatcher;
pub mod error;
pub mod methods;
pub mod sdk;
pub mod template;
pub mod types;

// Re-exports
pub use bazaar::{
    FungibleTokenParams, MethodCall, TokenLaunch, TokenLaunchParams, TokenSaleParams,
    TokenVotingParams, WordBazaar,
};
pub use cache::InstanceCache;
pub use deployer::ContractDeployer;
pub use dispatcher::MethodDispatcher;
pub use error::{BazaarError, ContractResult};
pub use methods::{ContractHandle, FungibleToken, TokenMetaInfo, TokenSale, TokenVoting, WordRegistry};
pub use sdk::{
    CallOptions, CallResult, ContractInstance, ContractSdk, DeployInfo, InstanceOptions,
    SdkError, SdkResult, SharedInstance,
};
pub use template::SourceTemplate;
pub use types::{ContractAddress, ContractKind};
