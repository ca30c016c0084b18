//! Error types for contract orchestration.

use crate::sdk::SdkError;
use crate::types::{ContractAddress, ContractKind};
use thiserror::Error;

/// Errors surfaced by the orchestration layer.
///
/// SDK failures are carried unchanged in `source`, tagged with the operation
/// and cache key that triggered them.
#[derive(Error, Debug, Clone)]
pub enum BazaarError {
    /// The bundled template no longer contains the literal it is patched at.
    #[error("Template mismatch: expected literal `{expected}` not found in source")]
    TemplateMismatch {
        /// Exact substring that was searched for.
        expected: String,
    },

    /// A decimal-parameterized template was deployed without a precision.
    #[error("Deploying a {kind} contract requires a decimal precision")]
    MissingDecimals {
        /// Contract kind.
        kind: ContractKind,
    },

    /// Requested precision is beyond what the templates support.
    #[error("Decimal precision {decimals} for {kind} exceeds maximum of {max}")]
    InvalidDecimals {
        /// Contract kind.
        kind: ContractKind,
        /// Requested precision.
        decimals: u32,
        /// Largest accepted precision.
        max: u32,
    },

    /// A singleton contract was addressed at a different address than it is bound to.
    #[error("{kind} is bound to {bound}, not {requested}")]
    SingletonAddress {
        /// Contract kind.
        kind: ContractKind,
        /// Address the singleton is bound to.
        bound: ContractAddress,
        /// Address the caller asked for.
        requested: ContractAddress,
    },

    /// Compilation or deployment rejected by the SDK.
    #[error("Failed to deploy {kind} contract: {source}")]
    Deployment {
        /// Contract kind.
        kind: ContractKind,
        /// SDK failure.
        #[source]
        source: SdkError,
    },

    /// Binding to an existing deployment failed.
    #[error("Failed to look up {kind} contract at {address}: {source}")]
    Lookup {
        /// Contract kind.
        kind: ContractKind,
        /// Contract address.
        address: ContractAddress,
        /// SDK failure.
        #[source]
        source: SdkError,
    },

    /// Method call failed.
    #[error("Call to {kind}.{method} at {address} failed: {source}")]
    Invocation {
        /// Contract kind.
        kind: ContractKind,
        /// Contract address.
        address: ContractAddress,
        /// Method name.
        method: String,
        /// SDK failure.
        #[source]
        source: SdkError,
    },

    /// Decoded result did not have the expected shape.
    #[error("Unexpected result from {method}: {message}")]
    Decode {
        /// Method name.
        method: String,
        /// Error message.
        message: String,
    },
}

impl BazaarError {
    /// Create a template mismatch error.
    pub fn template_mismatch<S: Into<String>>(expected: S) -> Self {
        Self::TemplateMismatch {
            expected: expected.into(),
        }
    }

    /// Create a deployment error.
    pub fn deployment(kind: ContractKind, source: SdkError) -> Self {
        Self::Deployment { kind, source }
    }

    /// Create a lookup error.
    pub fn lookup(kind: ContractKind, address: &ContractAddress, source: SdkError) -> Self {
        Self::Lookup {
            kind,
            address: address.clone(),
            source,
        }
    }

    /// Create an invocation error.
    pub fn invocation<S: Into<String>>(
        kind: ContractKind,
        address: &ContractAddress,
        method: S,
        source: SdkError,
    ) -> Self {
        Self::Invocation {
            kind,
            address: address.clone(),
            method: method.into(),
            source,
        }
    }

    /// Create a decode error.
    pub fn decode<M: Into<String>, S: ToString>(method: M, message: S) -> Self {
        Self::Decode {
            method: method.into(),
            message: message.to_string(),
        }
    }

    /// The untouched SDK failure, if this error came from the SDK.
    pub fn sdk_error(&self) -> Option<&SdkError> {
        match self {
            Self::Deployment { source, .. }
            | Self::Lookup { source, .. }
            | Self::Invocation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for orchestration operations.
pub type ContractResult<T> = std::result::Result<T, BazaarError>;
