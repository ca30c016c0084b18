//! External SDK boundary.
//!
//! The orchestration layer never talks to a node directly. Everything that
//! compiles, deploys or calls a contract goes through [`ContractSdk`] and the
//! [`ContractInstance`] handles it returns.

use crate::types::ContractAddress;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Shared handle to a live contract binding.
pub type SharedInstance = Arc<dyn ContractInstance>;

/// Result type for SDK calls.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Failures reported by the external SDK.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    /// Source failed to compile.
    #[error("Compilation failed: {message}")]
    Compilation {
        /// Compiler output.
        message: String,
    },

    /// Account cannot pay for the transaction.
    #[error("Insufficient balance: {message}")]
    InsufficientBalance {
        /// Error message.
        message: String,
    },

    /// Node could not be reached or answered garbage.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Call was executed and reverted.
    #[error("Call to {method} reverted: {reason}")]
    Reverted {
        /// Method name.
        method: String,
        /// Revert reason.
        reason: String,
    },

    /// Method is not part of the contract interface.
    #[error("Method not found: {method}")]
    MethodNotFound {
        /// Method name.
        method: String,
    },

    /// Wrong number of positional arguments.
    #[error("Method {method} expects {expected} arguments, got {received}")]
    ArgumentCount {
        /// Method name.
        method: String,
        /// Declared arity.
        expected: usize,
        /// Supplied arguments.
        received: usize,
    },

    /// No contract exists at the address.
    #[error("Contract not found: {address}")]
    ContractNotFound {
        /// Contract address.
        address: String,
    },

    /// Anything else the SDK reports.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl SdkError {
    pub fn compilation<S: Into<String>>(message: S) -> Self {
        Self::Compilation {
            message: message.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn reverted<M: Into<String>, R: Into<String>>(method: M, reason: R) -> Self {
        Self::Reverted {
            method: method.into(),
            reason: reason.into(),
        }
    }

    pub fn method_not_found<S: Into<String>>(method: S) -> Self {
        Self::MethodNotFound {
            method: method.into(),
        }
    }

    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Options for [`ContractSdk::get_contract_instance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceOptions {
    /// Bind to an existing deployment instead of preparing a new one.
    pub contract_address: Option<ContractAddress>,
}

impl InstanceOptions {
    /// Options for binding to the contract already deployed at `address`.
    pub fn at(address: ContractAddress) -> Self {
        Self {
            contract_address: Some(address),
        }
    }
}

/// Per-call configuration bag (amount, gas, fee, ...), forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallOptions(Map<String, Value>);

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a single option.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for CallOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Result of a fresh deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployInfo {
    pub address: ContractAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Response envelope of a method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    /// Application-level return value.
    pub decoded_result: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
}

impl CallResult {
    pub fn decoded(decoded_result: Value) -> Self {
        Self {
            decoded_result,
            transaction_hash: None,
            gas_used: None,
        }
    }
}

/// Capability object that compiles sources and binds contract instances.
#[async_trait]
pub trait ContractSdk: Send + Sync {
    /// Prepares an instance for `source`. With `options.contract_address` set
    /// the instance is bound to that deployment and nothing is deployed.
    async fn get_contract_instance(
        &self,
        source: &str,
        options: InstanceOptions,
    ) -> SdkResult<SharedInstance>;
}

/// Live binding to a contract.
#[async_trait]
pub trait ContractInstance: Send + Sync {
    /// Runs the constructor, creating the contract on chain.
    async fn deploy(&self, init_args: Vec<Value>, options: CallOptions) -> SdkResult<DeployInfo>;

    /// Calls `method` with positional `args`; `options` trail the arguments.
    async fn call(
        &self,
        method: &str,
        args: Vec<Value>,
        options: CallOptions,
    ) -> SdkResult<CallResult>;

    /// Address the instance is bound to, once known.
    fn address(&self) -> Option<ContractAddress>;
}
