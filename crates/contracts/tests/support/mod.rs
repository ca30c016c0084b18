//! In-memory stand-in for the external contract SDK.
//!
//! Records every compilation, deployment and call so tests can assert on
//! exactly what crossed the SDK boundary.

#![allow(dead_code)]

use async_trait::async_trait;
use bazaar_contracts::{
    CallOptions, CallResult, ContractAddress, ContractInstance, ContractSdk, DeployInfo,
    InstanceOptions, SdkError, SdkResult, SharedInstance,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Deployment {
    pub source: String,
    pub init_args: Vec<Value>,
    pub options: CallOptions,
    pub address: ContractAddress,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub address: Option<ContractAddress>,
    pub method: String,
    pub args: Vec<Value>,
    pub options: CallOptions,
}

#[derive(Default)]
struct ChainState {
    next_contract: AtomicUsize,
    compilations: AtomicUsize,
    lookups: AtomicUsize,
    latency: Mutex<Option<Duration>>,
    deployments: Mutex<Vec<Deployment>>,
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<String, Value>>,
    compile_failure: Mutex<Option<SdkError>>,
    lookup_failure: Mutex<Option<SdkError>>,
}

#[derive(Clone, Default)]
pub struct FakeChain {
    state: Arc<ChainState>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sdk(&self) -> Arc<dyn ContractSdk> {
        Arc::new(self.clone())
    }

    /// Every SDK round trip sleeps for `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.state.latency.lock() = Some(latency);
        self
    }

    pub fn respond(&self, method: &str, decoded_result: Value) {
        self.state
            .responses
            .lock()
            .insert(method.to_string(), decoded_result);
    }

    pub fn fail_compilation(&self, err: SdkError) {
        *self.state.compile_failure.lock() = Some(err);
    }

    pub fn fail_lookups(&self, err: Option<SdkError>) {
        *self.state.lookup_failure.lock() = err;
    }

    pub fn compilations(&self) -> usize {
        self.state.compilations.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.state.lookups.load(Ordering::SeqCst)
    }

    pub fn deployments(&self) -> Vec<Deployment> {
        self.state.deployments.lock().clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().clone()
    }

    async fn round_trip(&self) {
        let latency = *self.state.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ContractSdk for FakeChain {
    async fn get_contract_instance(
        &self,
        source: &str,
        options: InstanceOptions,
    ) -> SdkResult<SharedInstance> {
        match options.contract_address {
            Some(address) => {
                self.state.lookups.fetch_add(1, Ordering::SeqCst);
                self.round_trip().await;
                let failure = self.state.lookup_failure.lock().clone();
                if let Some(err) = failure {
                    return Err(err);
                }
                Ok(Arc::new(FakeInstance::new(self.clone(), source, Some(address))))
            }
            None => {
                self.state.compilations.fetch_add(1, Ordering::SeqCst);
                self.round_trip().await;
                let failure = self.state.compile_failure.lock().clone();
                if let Some(err) = failure {
                    return Err(err);
                }
                Ok(Arc::new(FakeInstance::new(self.clone(), source, None)))
            }
        }
    }
}

pub struct FakeInstance {
    chain: FakeChain,
    source: String,
    address: Mutex<Option<ContractAddress>>,
}

impl FakeInstance {
    fn new(chain: FakeChain, source: &str, address: Option<ContractAddress>) -> Self {
        Self {
            chain,
            source: source.to_string(),
            address: Mutex::new(address),
        }
    }
}

#[async_trait]
impl ContractInstance for FakeInstance {
    async fn deploy(&self, init_args: Vec<Value>, options: CallOptions) -> SdkResult<DeployInfo> {
        if self.address.lock().is_some() {
            return Err(SdkError::other("instance already deployed"));
        }
        self.chain.round_trip().await;

        let id = self.chain.state.next_contract.fetch_add(1, Ordering::SeqCst);
        let address = ContractAddress::new(format!("ct_fake{}", id));
        *self.address.lock() = Some(address.clone());
        self.chain.state.deployments.lock().push(Deployment {
            source: self.source.clone(),
            init_args,
            options,
            address: address.clone(),
        });
        Ok(DeployInfo {
            address,
            transaction_hash: Some(format!("th_deploy{}", id)),
        })
    }

    async fn call(
        &self,
        method: &str,
        args: Vec<Value>,
        options: CallOptions,
    ) -> SdkResult<CallResult> {
        self.chain.round_trip().await;
        let address = self.address.lock().clone();
        if address.is_none() {
            return Err(SdkError::ContractNotFound {
                address: "<undeployed>".to_string(),
            });
        }
        if method == "missing_method" {
            return Err(SdkError::method_not_found(method));
        }
        if method == "always_reverts" {
            return Err(SdkError::reverted(method, "REVERTED_BY_TEST"));
        }

        self.chain.state.calls.lock().push(RecordedCall {
            address,
            method: method.to_string(),
            args,
            options,
        });
        let decoded = self
            .chain
            .state
            .responses
            .lock()
            .get(method)
            .cloned()
            .unwrap_or(Value::Null);
        Ok(CallResult {
            decoded_result: decoded,
            transaction_hash: Some("th_call".to_string()),
            gas_used: Some(21_000),
        })
    }

    fn address(&self) -> Option<ContractAddress> {
        self.address.lock().clone()
    }
}
