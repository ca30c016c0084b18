//! Typed wrappers for the entrypoints of the bundled contracts.
//!
//! Methods not covered here remain reachable through
//! [`MethodDispatcher::invoke`].

use crate::decimals::{decode_numeral, numeral_value};
use crate::dispatcher::MethodDispatcher;
use crate::error::{BazaarError, ContractResult};
use crate::sdk::CallOptions;
use crate::types::{ContractAddress, ContractKind};
use num_bigint::BigInt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contract of a known kind at a known address.
#[derive(Clone)]
pub struct ContractHandle<'a> {
    dispatcher: &'a MethodDispatcher,
    kind: ContractKind,
    address: ContractAddress,
}

impl<'a> ContractHandle<'a> {
    pub fn new(dispatcher: &'a MethodDispatcher, kind: ContractKind, address: ContractAddress) -> Self {
        Self {
            dispatcher,
            kind,
            address,
        }
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    pub fn address(&self) -> &ContractAddress {
        &self.address
    }

    /// Generic escape hatch.
    pub async fn call(&self, method: &str, args: Vec<Value>, options: CallOptions) -> ContractResult<Value> {
        self.dispatcher
            .invoke(self.kind, &self.address, method, args, options)
            .await
    }

    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
        options: CallOptions,
    ) -> ContractResult<T> {
        self.dispatcher
            .invoke_as(self.kind, &self.address, method, args, options)
            .await
    }

    async fn call_numeral(&self, method: &str, args: Vec<Value>) -> ContractResult<BigInt> {
        let value = self.call(method, args, CallOptions::new()).await?;
        expect_numeral(method, &value)
    }
}

fn expect_numeral(method: &str, value: &Value) -> ContractResult<BigInt> {
    decode_numeral(value)
        .ok_or_else(|| BazaarError::decode(method, format!("expected an integer, got {}", value)))
}

/// Token sale backed by a bonding curve.
pub struct TokenSale<'a>(ContractHandle<'a>);

impl<'a> TokenSale<'a> {
    pub fn new(dispatcher: &'a MethodDispatcher, address: ContractAddress) -> Self {
        Self(ContractHandle::new(dispatcher, ContractKind::TokenSale, address))
    }

    pub fn handle(&self) -> &ContractHandle<'a> {
        &self.0
    }

    /// Binds the token minted by this sale. Can only be done once.
    pub async fn set_token(&self, token: &ContractAddress) -> ContractResult<()> {
        self.0
            .call("set_token", vec![token.clone().into()], CallOptions::new())
            .await
            .map(|_| ())
    }

    pub async fn get_token(&self) -> ContractResult<Option<ContractAddress>> {
        self.0.call_as("get_token", vec![], CallOptions::new()).await
    }

    pub async fn description(&self) -> ContractResult<String> {
        self.0.call_as("description", vec![], CallOptions::new()).await
    }

    /// Buys tokens by paying `amount` aettos.
    pub async fn buy(&self, amount: &BigInt) -> ContractResult<Value> {
        let options = CallOptions::new().with("amount", numeral_value(amount));
        self.0.call("buy", vec![], options).await
    }

    pub async fn sell(&self, token_count: &BigInt) -> ContractResult<Value> {
        self.0
            .call("sell", vec![numeral_value(token_count)], CallOptions::new())
            .await
    }

    pub async fn calculate_buy_price(&self, token_count: &BigInt) -> ContractResult<BigInt> {
        self.0
            .call_numeral("calculate_buy_price", vec![numeral_value(token_count)])
            .await
    }

    pub async fn calculate_sell_return(&self, token_count: &BigInt) -> ContractResult<BigInt> {
        self.0
            .call_numeral("calculate_sell_return", vec![numeral_value(token_count)])
            .await
    }
}

/// Token-weighted vote.
pub struct TokenVoting<'a>(ContractHandle<'a>);

impl<'a> TokenVoting<'a> {
    pub fn new(dispatcher: &'a MethodDispatcher, address: ContractAddress) -> Self {
        Self(ContractHandle::new(dispatcher, ContractKind::TokenVoting, address))
    }

    pub fn handle(&self) -> &ContractHandle<'a> {
        &self.0
    }

    pub async fn vote(&self, agreement: bool, amount: &BigInt) -> ContractResult<Value> {
        self.0
            .call(
                "vote",
                vec![Value::Bool(agreement), numeral_value(amount)],
                CallOptions::new(),
            )
            .await
    }

    pub async fn revoke_vote(&self) -> ContractResult<Value> {
        self.0.call("revoke_vote", vec![], CallOptions::new()).await
    }

    pub async fn withdraw(&self) -> ContractResult<Value> {
        self.0.call("withdraw", vec![], CallOptions::new()).await
    }

    pub async fn is_closed(&self) -> ContractResult<bool> {
        self.0.call_as("is_closed", vec![], CallOptions::new()).await
    }

    pub async fn get_state(&self) -> ContractResult<Value> {
        self.0.call("get_state", vec![], CallOptions::new()).await
    }
}

/// AEX-9 token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetaInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Fungible token minted by a token sale.
pub struct FungibleToken<'a>(ContractHandle<'a>);

impl<'a> FungibleToken<'a> {
    pub fn new(dispatcher: &'a MethodDispatcher, address: ContractAddress) -> Self {
        Self(ContractHandle::new(dispatcher, ContractKind::FungibleToken, address))
    }

    pub fn handle(&self) -> &ContractHandle<'a> {
        &self.0
    }

    pub async fn meta_info(&self) -> ContractResult<TokenMetaInfo> {
        self.0.call_as("meta_info", vec![], CallOptions::new()).await
    }

    pub async fn total_supply(&self) -> ContractResult<BigInt> {
        self.0.call_numeral("total_supply", vec![]).await
    }

    /// Balance of `account`; `None` if it never held the token.
    pub async fn balance(&self, account: &str) -> ContractResult<Option<BigInt>> {
        let value = self
            .0
            .call("balance", vec![Value::from(account)], CallOptions::new())
            .await?;
        match value {
            Value::Null => Ok(None),
            other => expect_numeral("balance", &other).map(Some),
        }
    }

    pub async fn transfer(&self, to_account: &str, amount: &BigInt) -> ContractResult<Value> {
        self.0
            .call(
                "transfer",
                vec![Value::from(to_account), numeral_value(amount)],
                CallOptions::new(),
            )
            .await
    }

    pub async fn create_allowance(&self, for_account: &str, amount: &BigInt) -> ContractResult<Value> {
        self.0
            .call(
                "create_allowance",
                vec![Value::from(for_account), numeral_value(amount)],
                CallOptions::new(),
            )
            .await
    }
}

/// Registry of every word token, keyed by symbol.
pub struct WordRegistry<'a>(ContractHandle<'a>);

impl<'a> WordRegistry<'a> {
    pub fn new(dispatcher: &'a MethodDispatcher, address: ContractAddress) -> Self {
        Self(ContractHandle::new(dispatcher, ContractKind::WordRegistry, address))
    }

    pub fn handle(&self) -> &ContractHandle<'a> {
        &self.0
    }

    pub async fn add_token(&self, token: &ContractAddress) -> ContractResult<Value> {
        self.0
            .call("add_token", vec![token.clone().into()], CallOptions::new())
            .await
    }

    pub async fn remove_token(&self, symbol: &str) -> ContractResult<Value> {
        self.0
            .call("remove_token", vec![Value::from(symbol)], CallOptions::new())
            .await
    }

    pub async fn get_state(&self) -> ContractResult<Value> {
        self.0.call("get_state", vec![], CallOptions::new()).await
    }
}
