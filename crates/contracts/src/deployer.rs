//! Contract deployment pipeline.

use crate::cache::InstanceCache;
use crate::error::{BazaarError, ContractResult};
use crate::sdk::{CallOptions, ContractSdk, InstanceOptions};
use crate::template::SourceTemplate;
use crate::types::ContractAddress;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Deploys contracts from source templates and caches the new instances.
pub struct ContractDeployer {
    sdk: Arc<dyn ContractSdk>,
    cache: Arc<InstanceCache>,
    deploy_options: CallOptions,
}

impl ContractDeployer {
    pub fn new(sdk: Arc<dyn ContractSdk>, cache: Arc<InstanceCache>) -> Self {
        Self {
            sdk,
            cache,
            deploy_options: CallOptions::new(),
        }
    }

    /// Options handed to every constructor call.
    pub fn with_deploy_options(mut self, options: CallOptions) -> Self {
        self.deploy_options = options;
        self
    }

    /// Deploys `template` with constructor arguments `init_args`.
    ///
    /// Decimal-parameterized templates are patched for `decimals` first; a
    /// patch failure aborts before anything reaches the SDK. SDK failures are
    /// returned as [`BazaarError::Deployment`] without retry.
    pub async fn deploy(
        &self,
        template: &SourceTemplate,
        init_args: Vec<Value>,
        decimals: Option<u32>,
    ) -> ContractResult<ContractAddress> {
        let kind = template.kind();
        let source = template.specialize(decimals)?;

        debug!(%kind, args = init_args.len(), "compiling contract");
        let instance = self
            .sdk
            .get_contract_instance(&source, InstanceOptions::default())
            .await
            .map_err(|err| BazaarError::deployment(kind, err))?;

        let deploy_info = instance
            .deploy(init_args, self.deploy_options.clone())
            .await
            .map_err(|err| BazaarError::deployment(kind, err))?;

        let address = deploy_info.address;
        self.cache.register(kind, &address, instance);
        info!(
            %kind,
            %address,
            tx = deploy_info.transaction_hash.as_deref().unwrap_or("-"),
            "contract deployed"
        );
        Ok(address)
    }
}
