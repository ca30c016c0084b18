//! Method dispatch against cached contract instances.

use crate::cache::InstanceCache;
use crate::error::{BazaarError, ContractResult};
use crate::sdk::{CallOptions, ContractSdk, InstanceOptions, SharedInstance};
use crate::template::SourceTemplate;
use crate::types::{ContractAddress, ContractKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Resolves instances through the cache and calls their methods.
pub struct MethodDispatcher {
    sdk: Arc<dyn ContractSdk>,
    cache: Arc<InstanceCache>,
    word_registry_address: ContractAddress,
}

impl MethodDispatcher {
    /// `word_registry_address` is the only address the registry singleton
    /// answers to.
    pub fn new(
        sdk: Arc<dyn ContractSdk>,
        cache: Arc<InstanceCache>,
        word_registry_address: ContractAddress,
    ) -> Self {
        Self {
            sdk,
            cache,
            word_registry_address,
        }
    }

    pub fn word_registry_address(&self) -> &ContractAddress {
        &self.word_registry_address
    }

    /// Cached instance for `(kind, address)`.
    ///
    /// On a miss the existing deployment at `address` is looked up through
    /// the SDK. Nothing is ever deployed here. Singleton kinds only accept
    /// the address they are bound to.
    pub async fn instance(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
    ) -> ContractResult<SharedInstance> {
        if kind.is_singleton() && *address != self.word_registry_address {
            return Err(BazaarError::SingletonAddress {
                kind,
                bound: self.word_registry_address.clone(),
                requested: address.clone(),
            });
        }
        self.cache
            .get_or_init(kind, address, || self.lookup(kind, address))
            .await
    }

    async fn lookup(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
    ) -> ContractResult<SharedInstance> {
        debug!(%kind, %address, "binding to deployed contract");
        let template = SourceTemplate::bundled(kind);
        self.sdk
            .get_contract_instance(template.source(), InstanceOptions::at(address.clone()))
            .await
            .map_err(|err| BazaarError::lookup(kind, address, err))
    }

    /// Calls `method` with `args` then `options`, returning only the decoded result.
    pub async fn invoke(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
        method: &str,
        args: Vec<Value>,
        options: CallOptions,
    ) -> ContractResult<Value> {
        let instance = self.instance(kind, address).await?;
        call_instance(&instance, kind, address, method, args, options).await
    }

    /// Like [`MethodDispatcher::invoke`], deserializing the decoded result.
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        kind: ContractKind,
        address: &ContractAddress,
        method: &str,
        args: Vec<Value>,
        options: CallOptions,
    ) -> ContractResult<T> {
        let value = self.invoke(kind, address, method, args, options).await?;
        serde_json::from_value(value).map_err(|err| BazaarError::decode(method, err))
    }
}

pub(crate) async fn call_instance(
    instance: &SharedInstance,
    kind: ContractKind,
    address: &ContractAddress,
    method: &str,
    args: Vec<Value>,
    options: CallOptions,
) -> ContractResult<Value> {
    debug!(%kind, %address, method, args = args.len(), "invoking contract method");
    instance
        .call(method, args, options)
        .await
        .map(|result| result.decoded_result)
        .map_err(|err| BazaarError::invocation(kind, address, method, err))
}
