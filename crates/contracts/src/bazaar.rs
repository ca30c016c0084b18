//! Host-facing entry point.
//!
//! [`WordBazaar`] owns the instance cache and wires the deployer and the
//! dispatcher to one SDK handle. Hosts keep one per process and share it.

use crate::cache::InstanceCache;
use crate::deployer::ContractDeployer;
use crate::dispatcher::{call_instance, MethodDispatcher};
use crate::error::ContractResult;
use crate::methods::{FungibleToken, TokenSale, TokenVoting, WordRegistry};
use crate::sdk::{CallOptions, ContractSdk, SharedInstance};
use crate::template::SourceTemplate;
use crate::types::{ContractAddress, ContractKind};
use bazaar_config::BazaarConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Constructor parameters of a token sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSaleParams {
    pub decimals: u32,
    /// Blocks before the sale can be closed.
    pub timeout: u64,
    pub bonding_curve_address: ContractAddress,
    pub description: String,
}

/// Constructor parameters of a fungible token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleTokenParams {
    pub name: String,
    pub decimals: u32,
    pub symbol: String,
    /// Owner of the token; the sale mints on purchase.
    pub token_sale_address: ContractAddress,
}

/// Constructor parameters of a token vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenVotingParams {
    /// Vote metadata record, passed through untouched.
    pub metadata: Value,
    pub close_height: u64,
    pub token: ContractAddress,
}

/// Parameters for launching a complete word token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLaunchParams {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub timeout: u64,
    /// Falls back to the configured default precision.
    #[serde(default)]
    pub decimals: Option<u32>,
}

/// Addresses produced by [`WordBazaar::launch_word_token`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLaunch {
    pub bonding_curve: ContractAddress,
    pub token_sale: ContractAddress,
    pub fungible_token: ContractAddress,
}

/// A named method call against an address-keyed contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub contract_address: ContractAddress,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub options: CallOptions,
}

impl MethodCall {
    pub fn new<M: Into<String>>(contract_address: ContractAddress, method: M) -> Self {
        Self {
            contract_address,
            method: method.into(),
            args: Vec::new(),
            options: CallOptions::new(),
        }
    }

    pub fn arg<V: Into<Value>>(mut self, arg: V) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }
}

/// Lifecycle manager for the word bazaar contracts.
pub struct WordBazaar {
    config: BazaarConfig,
    word_registry_address: ContractAddress,
    cache: Arc<InstanceCache>,
    deployer: ContractDeployer,
    dispatcher: MethodDispatcher,
}

impl WordBazaar {
    pub fn new(mut config: BazaarConfig, sdk: Arc<dyn ContractSdk>) -> Self {
        config.word_registry_address = config.word_registry_address.trim().to_string();
        let word_registry_address = ContractAddress::new(config.word_registry_address.clone());

        let cache = Arc::new(InstanceCache::new());
        let deployer = ContractDeployer::new(Arc::clone(&sdk), Arc::clone(&cache))
            .with_deploy_options(CallOptions::from(config.deploy_options.clone()));
        let dispatcher =
            MethodDispatcher::new(sdk, Arc::clone(&cache), word_registry_address.clone());
        Self {
            word_registry_address,
            config,
            cache,
            deployer,
            dispatcher,
        }
    }

    pub fn with_defaults(sdk: Arc<dyn ContractSdk>) -> Self {
        Self::new(BazaarConfig::default(), sdk)
    }

    pub fn config(&self) -> &BazaarConfig {
        &self.config
    }

    pub fn cache(&self) -> &InstanceCache {
        &self.cache
    }

    pub fn deployer(&self) -> &ContractDeployer {
        &self.deployer
    }

    pub fn dispatcher(&self) -> &MethodDispatcher {
        &self.dispatcher
    }

    pub fn word_registry_address(&self) -> &ContractAddress {
        &self.word_registry_address
    }

    // Lazy lookups

    pub async fn init_word_registry_contract_if_needed(&self) -> ContractResult<SharedInstance> {
        self.dispatcher
            .instance(ContractKind::WordRegistry, &self.word_registry_address)
            .await
    }

    pub async fn init_token_voting_contract_if_needed(
        &self,
        address: &ContractAddress,
    ) -> ContractResult<SharedInstance> {
        self.dispatcher.instance(ContractKind::TokenVoting, address).await
    }

    pub async fn init_token_sale_contract_if_needed(
        &self,
        address: &ContractAddress,
    ) -> ContractResult<SharedInstance> {
        self.dispatcher.instance(ContractKind::TokenSale, address).await
    }

    pub async fn init_fungible_token_contract_if_needed(
        &self,
        address: &ContractAddress,
    ) -> ContractResult<SharedInstance> {
        self.dispatcher.instance(ContractKind::FungibleToken, address).await
    }

    // Deployments

    /// Deploys a linear bonding curve whose alpha is scaled to `decimals`.
    pub async fn deploy_bonding_curve(&self, decimals: u32) -> ContractResult<ContractAddress> {
        self.deployer
            .deploy(
                &SourceTemplate::bundled(ContractKind::BondingCurve),
                Vec::new(),
                Some(decimals),
            )
            .await
    }

    pub async fn deploy_token_sale_contract(
        &self,
        params: TokenSaleParams,
    ) -> ContractResult<ContractAddress> {
        let init_args = vec![
            Value::from(params.timeout),
            params.bonding_curve_address.into(),
            Value::from(params.description),
        ];
        self.deployer
            .deploy(
                &SourceTemplate::bundled(ContractKind::TokenSale),
                init_args,
                Some(params.decimals),
            )
            .await
    }

    /// Deploys a token registered against the configured word registry.
    pub async fn deploy_fungible_token_contract(
        &self,
        params: FungibleTokenParams,
    ) -> ContractResult<ContractAddress> {
        let init_args = vec![
            Value::from(params.name),
            Value::from(params.decimals),
            Value::from(params.symbol),
            params.token_sale_address.into(),
            self.word_registry_address.clone().into(),
        ];
        self.deployer
            .deploy(
                &SourceTemplate::bundled(ContractKind::FungibleToken),
                init_args,
                None,
            )
            .await
    }

    pub async fn deploy_token_voting_contract(
        &self,
        params: TokenVotingParams,
    ) -> ContractResult<ContractAddress> {
        let init_args = vec![
            params.metadata,
            Value::from(params.close_height),
            params.token.into(),
        ];
        self.deployer
            .deploy(
                &SourceTemplate::bundled(ContractKind::TokenVoting),
                init_args,
                None,
            )
            .await
    }

    /// Deploys curve, sale and token in order, binds the token to the sale
    /// and registers it with the word registry.
    pub async fn launch_word_token(&self, params: TokenLaunchParams) -> ContractResult<TokenLaunch> {
        let decimals = params.decimals.unwrap_or(self.config.default_decimals);

        let bonding_curve = self.deploy_bonding_curve(decimals).await?;
        let token_sale = self
            .deploy_token_sale_contract(TokenSaleParams {
                decimals,
                timeout: params.timeout,
                bonding_curve_address: bonding_curve.clone(),
                description: params.description,
            })
            .await?;
        let fungible_token = self
            .deploy_fungible_token_contract(FungibleTokenParams {
                name: params.name,
                decimals,
                symbol: params.symbol.clone(),
                token_sale_address: token_sale.clone(),
            })
            .await?;

        self.token_sale(token_sale.clone())
            .set_token(&fungible_token)
            .await?;
        self.word_registry_add_token(&fungible_token).await?;

        info!(
            symbol = %params.symbol,
            %bonding_curve,
            %token_sale,
            %fungible_token,
            "word token launched"
        );
        Ok(TokenLaunch {
            bonding_curve,
            token_sale,
            fungible_token,
        })
    }

    // Dispatch

    /// Registers `token_address` with the word registry singleton.
    pub async fn word_registry_add_token(
        &self,
        token_address: &ContractAddress,
    ) -> ContractResult<Value> {
        let registry = self.init_word_registry_contract_if_needed().await?;
        call_instance(
            &registry,
            ContractKind::WordRegistry,
            &self.word_registry_address,
            "add_token",
            vec![token_address.clone().into()],
            CallOptions::new(),
        )
        .await
    }

    pub async fn token_sale_method(&self, call: MethodCall) -> ContractResult<Value> {
        self.invoke(ContractKind::TokenSale, call).await
    }

    pub async fn token_voting_method(&self, call: MethodCall) -> ContractResult<Value> {
        self.invoke(ContractKind::TokenVoting, call).await
    }

    pub async fn fungible_token_method(&self, call: MethodCall) -> ContractResult<Value> {
        self.invoke(ContractKind::FungibleToken, call).await
    }

    pub async fn bonding_curve_method(&self, call: MethodCall) -> ContractResult<Value> {
        self.invoke(ContractKind::BondingCurve, call).await
    }

    /// Generic dispatch for any address-keyed kind.
    ///
    /// The word registry is only reachable at the configured address.
    pub async fn invoke(&self, kind: ContractKind, call: MethodCall) -> ContractResult<Value> {
        self.dispatcher
            .invoke(
                kind,
                &call.contract_address,
                &call.method,
                call.args,
                call.options,
            )
            .await
    }

    // Typed handles

    pub fn word_registry(&self) -> WordRegistry<'_> {
        WordRegistry::new(&self.dispatcher, self.word_registry_address.clone())
    }

    pub fn token_sale(&self, address: ContractAddress) -> TokenSale<'_> {
        TokenSale::new(&self.dispatcher, address)
    }

    pub fn token_voting(&self, address: ContractAddress) -> TokenVoting<'_> {
        TokenVoting::new(&self.dispatcher, address)
    }

    pub fn fungible_token(&self, address: ContractAddress) -> FungibleToken<'_> {
        FungibleToken::new(&self.dispatcher, address)
    }
}
