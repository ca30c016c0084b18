//! Contract identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new<S: Into<String>>(address: S) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContractAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContractAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for ContractAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl From<ContractAddress> for serde_json::Value {
    fn from(address: ContractAddress) -> Self {
        serde_json::Value::String(address.0)
    }
}

/// Functional category of a managed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    WordRegistry,
    TokenSale,
    TokenVoting,
    FungibleToken,
    BondingCurve,
}

impl ContractKind {
    pub const ALL: [ContractKind; 5] = [
        ContractKind::WordRegistry,
        ContractKind::TokenSale,
        ContractKind::TokenVoting,
        ContractKind::FungibleToken,
        ContractKind::BondingCurve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::WordRegistry => "word_registry",
            ContractKind::TokenSale => "token_sale",
            ContractKind::TokenVoting => "token_voting",
            ContractKind::FungibleToken => "fungible_token",
            ContractKind::BondingCurve => "bonding_curve",
        }
    }

    /// At most one instance of a singleton kind is ever cached.
    pub fn is_singleton(&self) -> bool {
        matches!(self, ContractKind::WordRegistry)
    }

    /// Whether the source must be specialized for a decimal precision before deployment.
    pub fn requires_decimals(&self) -> bool {
        matches!(self, ContractKind::TokenSale | ContractKind::BondingCurve)
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown contract kind: {}", s))
    }
}
