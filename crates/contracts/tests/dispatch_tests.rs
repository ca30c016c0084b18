//! Method dispatch and the typed contract wrappers.

mod support;

use bazaar_config::BazaarConfig;
use bazaar_contracts::{
    BazaarError, CallOptions, ContractAddress, ContractKind, MethodCall, SdkError, TokenMetaInfo,
    WordBazaar, WordRegistry,
};
use num_bigint::BigInt;
use serde_json::json;
use support::FakeChain;

fn bazaar(chain: &FakeChain) -> WordBazaar {
    WordBazaar::new(
        BazaarConfig::default().with_word_registry_address("ct_registry"),
        chain.sdk(),
    )
}

#[tokio::test]
async fn test_args_and_options_forwarded_verbatim() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("buy", json!({ "bought": 42 }));

    let call = MethodCall::new(ContractAddress::new("ct_sale"), "buy")
        .arg("a")
        .arg("b")
        .options(CallOptions::new().with("amount", 100));
    let result = bazaar.token_sale_method(call).await.unwrap();

    assert_eq!(result, json!({ "bought": 42 }), "only the decoded result is returned");
    let calls = chain.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].address, Some(ContractAddress::new("ct_sale")));
    assert_eq!(calls[0].method, "buy");
    assert_eq!(calls[0].args, vec![json!("a"), json!("b")]);
    assert_eq!(calls[0].options, CallOptions::new().with("amount", 100));
}

#[tokio::test]
async fn test_dispatch_reuses_cached_instance() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    let token = ContractAddress::new("ct_token");

    for _ in 0..3 {
        bazaar
            .fungible_token_method(MethodCall::new(token.clone(), "total_supply"))
            .await
            .unwrap();
    }

    assert_eq!(chain.lookups(), 1);
    assert_eq!(chain.calls().len(), 3);
}

#[tokio::test]
async fn test_each_kind_dispatches_to_its_own_instance() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    let address = ContractAddress::new("ct_shared");

    bazaar
        .token_voting_method(MethodCall::new(address.clone(), "get_state"))
        .await
        .unwrap();
    bazaar
        .bonding_curve_method(MethodCall::new(address.clone(), "buy_price").arg(10))
        .await
        .unwrap();

    assert_eq!(chain.lookups(), 2);
    assert!(bazaar.cache().contains(ContractKind::TokenVoting, &address));
    assert!(bazaar.cache().contains(ContractKind::BondingCurve, &address));
}

#[tokio::test]
async fn test_missing_method_is_tagged() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);

    let err = bazaar
        .fungible_token_method(MethodCall::new(ContractAddress::new("ct_token"), "missing_method"))
        .await
        .unwrap_err();

    match err {
        BazaarError::Invocation {
            kind,
            address,
            method,
            source,
        } => {
            assert_eq!(kind, ContractKind::FungibleToken);
            assert_eq!(address, ContractAddress::new("ct_token"));
            assert_eq!(method, "missing_method");
            assert!(matches!(source, SdkError::MethodNotFound { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_revert_reason_is_preserved() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);

    let err = bazaar
        .token_voting_method(MethodCall::new(ContractAddress::new("ct_vote"), "always_reverts"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.sdk_error(),
        Some(SdkError::Reverted { reason, .. }) if reason == "REVERTED_BY_TEST"
    ));
    assert!(err.to_string().contains("always_reverts"));
    // the instance itself was fine and stays cached
    assert!(bazaar
        .cache()
        .contains(ContractKind::TokenVoting, &ContractAddress::new("ct_vote")));
}

#[tokio::test]
async fn test_word_registry_add_token_targets_configured_registry() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("add_token", json!(null));

    bazaar
        .word_registry_add_token(&ContractAddress::new("ct_token"))
        .await
        .unwrap();
    bazaar
        .word_registry()
        .add_token(&ContractAddress::new("ct_other"))
        .await
        .unwrap();

    let calls = chain.calls();
    assert_eq!(calls.len(), 2);
    for call in &calls {
        assert_eq!(call.address, Some(ContractAddress::new("ct_registry")));
        assert_eq!(call.method, "add_token");
    }
    assert_eq!(calls[0].args, vec![json!("ct_token")]);
    assert_eq!(chain.lookups(), 1);
}

#[tokio::test]
async fn test_word_registry_rejects_other_addresses() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);

    let err = bazaar
        .invoke(
            ContractKind::WordRegistry,
            MethodCall::new(ContractAddress::new("ct_elsewhere"), "get_state"),
        )
        .await
        .unwrap_err();

    match err {
        BazaarError::SingletonAddress {
            kind,
            bound,
            requested,
        } => {
            assert_eq!(kind, ContractKind::WordRegistry);
            assert_eq!(bound, ContractAddress::new("ct_registry"));
            assert_eq!(requested, ContractAddress::new("ct_elsewhere"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(chain.lookups(), 0);
    assert!(chain.calls().is_empty());

    bazaar
        .invoke(
            ContractKind::WordRegistry,
            MethodCall::new(ContractAddress::new("ct_registry"), "get_state"),
        )
        .await
        .unwrap();
    assert_eq!(chain.calls()[0].address, Some(ContractAddress::new("ct_registry")));
}

#[tokio::test]
async fn test_word_registry_handle_at_foreign_address_fails() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    let registry = WordRegistry::new(bazaar.dispatcher(), ContractAddress::new("ct_elsewhere"));

    let result = registry.get_state().await;

    assert!(matches!(result, Err(BazaarError::SingletonAddress { .. })));
    assert_eq!(chain.lookups(), 0);
}

#[tokio::test]
async fn test_token_sale_buy_sends_amount_as_option() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    let sale = bazaar.token_sale(ContractAddress::new("ct_sale"));

    sale.buy(&BigInt::from(1_500u32)).await.unwrap();

    let call = &chain.calls()[0];
    assert_eq!(call.method, "buy");
    assert!(call.args.is_empty());
    assert_eq!(call.options.get("amount"), Some(&json!(1500)));
}

#[tokio::test]
async fn test_large_numerals_sent_as_strings() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("calculate_buy_price", json!("123456789012345678901234567890"));
    let sale = bazaar.token_sale(ContractAddress::new("ct_sale"));
    let tokens = BigInt::from(10u8).pow(24);

    let price = sale.calculate_buy_price(&tokens).await.unwrap();

    assert_eq!(price.to_string(), "123456789012345678901234567890");
    assert_eq!(
        chain.calls()[0].args,
        vec![json!("1000000000000000000000000")]
    );
}

#[tokio::test]
async fn test_fungible_token_reads() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("total_supply", json!("5000000000000000000000"));
    chain.respond(
        "meta_info",
        json!({ "name": "Bazaar", "symbol": "BZR", "decimals": 18 }),
    );
    let token = bazaar.fungible_token(ContractAddress::new("ct_token"));

    let supply = token.total_supply().await.unwrap();
    let meta = token.meta_info().await.unwrap();
    let balance = token.balance("ak_nobody").await.unwrap();

    assert_eq!(supply, BigInt::from(5_000u32) * BigInt::from(10u8).pow(18));
    assert_eq!(
        meta,
        TokenMetaInfo {
            name: "Bazaar".to_string(),
            symbol: "BZR".to_string(),
            decimals: 18,
        }
    );
    assert_eq!(balance, None);
}

#[tokio::test]
async fn test_non_numeric_result_is_a_decode_error() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("balance", json!("not a number"));
    let token = bazaar.fungible_token(ContractAddress::new("ct_token"));

    let err = token.balance("ak_someone").await.unwrap_err();

    assert!(matches!(err, BazaarError::Decode { ref method, .. } if method == "balance"));
    assert_eq!(err.sdk_error(), None);
}

#[tokio::test]
async fn test_token_voting_wrappers() {
    let chain = FakeChain::new();
    let bazaar = bazaar(&chain);
    chain.respond("is_closed", json!(true));
    let voting = bazaar.token_voting(ContractAddress::new("ct_vote"));

    voting.vote(true, &BigInt::from(7u8)).await.unwrap();
    let closed = voting.is_closed().await.unwrap();

    assert!(closed);
    let calls = chain.calls();
    assert_eq!(calls[0].method, "vote");
    assert_eq!(calls[0].args, vec![json!(true), json!(7)]);
}

#[test]
fn test_method_call_deserialization_defaults() {
    let call: MethodCall = serde_json::from_value(json!({
        "contract_address": "ct_sale",
        "method": "description",
    }))
    .unwrap();

    assert_eq!(call.contract_address, ContractAddress::new("ct_sale"));
    assert_eq!(call.method, "description");
    assert!(call.args.is_empty());
    assert!(call.options.is_empty());
}
