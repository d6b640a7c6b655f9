use std::sync::Arc;

use alloy_primitives::Address;
use serde_json::json;

use crate::errors::Error;
use crate::events::{MockSessionEventSink, SessionEvent};
use crate::provider::{WalletEvent, WalletRpcError};
use crate::session::{SessionError, SessionFailure, SessionManager, SessionStatus};
use crate::test_support::{
    connected_manager, MockWalletProvider, OTHER_ACCOUNT, SEPOLIA, TEST_ACCOUNT,
};

fn manager_over(provider: Arc<MockWalletProvider>) -> (SessionManager, MockSessionEventSink) {
    let sink = MockSessionEventSink::new();
    let manager = SessionManager::new(provider, Arc::new(sink.clone()));
    (manager, sink)
}

fn account(raw: &str) -> Address {
    raw.parse().unwrap()
}

#[tokio::test]
async fn test_connect_binds_account_and_chain() {
    let provider = MockWalletProvider::new();
    provider.script_connect(TEST_ACCOUNT, "0xaa36a7");
    let (manager, sink) = manager_over(provider);

    let session = manager.connect(SEPOLIA).await.unwrap();

    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.account, Some(account(TEST_ACCOUNT)));
    assert_eq!(session.chain_id, Some(SEPOLIA));
    assert!(session.chain_supported);
    assert_eq!(
        sink.events(),
        vec![SessionEvent::Connected {
            account: account(TEST_ACCOUNT),
            chain_id: SEPOLIA,
        }]
    );
}

#[tokio::test]
async fn test_connect_switches_when_wallet_is_on_another_chain() {
    let provider = MockWalletProvider::new();
    // Wallet sits on mainnet; connect targets Sepolia.
    provider.script_connect(TEST_ACCOUNT, "0x1");
    provider.push("wallet_switchEthereumChain", Ok(json!(null)));
    let (manager, _sink) = manager_over(provider.clone());

    let session = manager.connect(SEPOLIA).await.unwrap();

    assert_eq!(session.chain_id, Some(SEPOLIA));
    assert!(provider
        .methods()
        .contains(&"wallet_switchEthereumChain".to_string()));
}

#[tokio::test]
async fn test_connect_rejection_is_distinguishable() {
    let provider = MockWalletProvider::new();
    provider.push(
        "eth_requestAccounts",
        Err(WalletRpcError::rpc(4001, "User rejected the request")),
    );
    let (manager, sink) = manager_over(provider);

    let err = manager.connect(SEPOLIA).await.unwrap_err();

    assert!(err.is_user_rejection());
    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Error);
    assert_eq!(session.last_error, Some(SessionFailure::Rejected));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_connect_generic_failure_is_not_a_rejection() {
    let provider = MockWalletProvider::new();
    provider.push(
        "eth_requestAccounts",
        Err(WalletRpcError::Transport("wallet crashed".into())),
    );
    let (manager, _sink) = manager_over(provider);

    let err = manager.connect(SEPOLIA).await.unwrap_err();

    assert!(!err.is_user_rejection());
    assert_eq!(
        manager.session().last_error,
        Some(SessionFailure::Failed(
            "Wallet transport failure: wallet crashed".into()
        ))
    );
}

#[tokio::test]
async fn test_connect_unregistered_chain_is_refused_upfront() {
    let provider = MockWalletProvider::new();
    let (manager, _sink) = manager_over(provider.clone());

    let err = manager.connect(999_999).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Session(SessionError::ChainNotRegistered(999_999))
    ));
    // Refused before any wallet round-trip.
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_switch_chain_adds_unknown_chain_then_retries_once() {
    let (manager, provider, _sink) = connected_manager().await;

    provider.push(
        "wallet_switchEthereumChain",
        Err(WalletRpcError::rpc(4902, "Unrecognized chain ID")),
    );
    provider.push("wallet_addEthereumChain", Ok(json!(null)));
    provider.push("wallet_switchEthereumChain", Ok(json!(null)));

    let session = manager.switch_chain(137).await.unwrap();

    assert_eq!(session.chain_id, Some(137));
    assert_eq!(session.status, SessionStatus::Connected);

    let methods = provider.methods();
    let tail = &methods[methods.len() - 3..];
    assert_eq!(
        tail,
        [
            "wallet_switchEthereumChain",
            "wallet_addEthereumChain",
            "wallet_switchEthereumChain"
        ]
    );
    // The add-chain request carries the registry descriptor.
    let add_params = provider.params_of(methods.len() - 2);
    assert_eq!(add_params[0]["chainId"], "0x89");
    assert_eq!(add_params[0]["chainName"], "Polygon");
}

#[tokio::test]
async fn test_switch_chain_never_adds_mainnet() {
    let (manager, provider, _sink) = connected_manager().await;

    provider.push(
        "wallet_switchEthereumChain",
        Err(WalletRpcError::rpc(4902, "Unrecognized chain ID")),
    );

    let err = manager.switch_chain(1).await.unwrap_err();

    assert!(!err.is_user_rejection());
    assert!(!provider
        .methods()
        .contains(&"wallet_addEthereumChain".to_string()));
    // Recoverable: still connected on the previous chain.
    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.chain_id, Some(SEPOLIA));
}

#[tokio::test]
async fn test_switch_chain_rejection_keeps_session_alive() {
    let (manager, provider, _sink) = connected_manager().await;

    provider.push(
        "wallet_switchEthereumChain",
        Err(WalletRpcError::rpc(4001, "User rejected the request")),
    );

    let err = manager.switch_chain(137).await.unwrap_err();

    assert!(err.is_user_rejection());
    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.chain_id, Some(SEPOLIA));
    assert_eq!(session.last_error, Some(SessionFailure::Rejected));
}

#[tokio::test]
async fn test_switch_chain_requires_connection() {
    let provider = MockWalletProvider::new();
    let (manager, _sink) = manager_over(provider);

    let err = manager.switch_chain(137).await.unwrap_err();
    assert!(matches!(err, Error::Session(SessionError::NotConnected)));
}

#[tokio::test]
async fn test_empty_accounts_changed_forces_disconnect() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.handle_event(WalletEvent::AccountsChanged(vec![]));

    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Disconnected);
    assert!(session.account.is_none());
    assert!(session.chain_id.is_none());
    assert_eq!(sink.events(), vec![SessionEvent::Disconnected]);
}

#[tokio::test]
async fn test_accounts_changed_rebinds_in_place() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.handle_event(WalletEvent::AccountsChanged(vec![account(OTHER_ACCOUNT)]));

    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.account, Some(account(OTHER_ACCOUNT)));
    // Chain binding is preserved.
    assert_eq!(session.chain_id, Some(SEPOLIA));
}

#[tokio::test]
async fn test_account_event_replay_is_idempotent() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.handle_event(WalletEvent::AccountsChanged(vec![account(OTHER_ACCOUNT)]));
    let epoch_after_first = manager.session().epoch();

    manager.handle_event(WalletEvent::AccountsChanged(vec![account(OTHER_ACCOUNT)]));

    assert_eq!(manager.session().epoch(), epoch_after_first);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_chain_changed_to_unregistered_chain_keeps_session() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.handle_event(WalletEvent::ChainChanged(31337));

    let session = manager.session();
    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.chain_id, Some(31337));
    assert!(!session.chain_supported);
    assert_eq!(
        sink.events(),
        vec![SessionEvent::ChainChanged {
            chain_id: 31337,
            supported: false,
        }]
    );
}

#[tokio::test]
async fn test_chain_event_replay_is_idempotent() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.handle_event(WalletEvent::ChainChanged(137));
    let epoch_after_first = manager.session().epoch();

    manager.handle_event(WalletEvent::ChainChanged(137));

    assert_eq!(manager.session().epoch(), epoch_after_first);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let (manager, _provider, sink) = connected_manager().await;
    sink.clear();

    manager.disconnect();
    let epoch_after_first = manager.session().epoch();
    manager.disconnect();

    assert_eq!(manager.session().epoch(), epoch_after_first);
    assert_eq!(sink.events(), vec![SessionEvent::Disconnected]);
}

#[tokio::test]
async fn test_events_before_connection_are_ignored() {
    let provider = MockWalletProvider::new();
    let (manager, sink) = manager_over(provider);

    manager.handle_event(WalletEvent::AccountsChanged(vec![account(TEST_ACCOUNT)]));
    manager.handle_event(WalletEvent::ChainChanged(137));

    assert_eq!(manager.session().status, SessionStatus::Disconnected);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_restore_rebinds_without_prompting() {
    let provider = MockWalletProvider::new();
    provider.push("eth_accounts", Ok(json!([TEST_ACCOUNT])));
    provider.push("eth_chainId", Ok(json!("0xaa36a7")));
    let (manager, sink) = manager_over(provider.clone());

    let session = manager.restore().await.unwrap().unwrap();

    assert_eq!(session.status, SessionStatus::Connected);
    assert_eq!(session.account, Some(account(TEST_ACCOUNT)));
    // The interactive prompt is never used on restore.
    assert!(!provider
        .methods()
        .contains(&"eth_requestAccounts".to_string()));
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_restore_without_authorization_leaves_session_untouched() {
    let provider = MockWalletProvider::new();
    provider.push("eth_accounts", Ok(json!([])));
    let (manager, sink) = manager_over(provider);

    let restored = manager.restore().await.unwrap();

    assert!(restored.is_none());
    assert_eq!(manager.session().status, SessionStatus::Disconnected);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_fingerprint_tracks_session_changes() {
    let (manager, _provider, _sink) = connected_manager().await;

    let fingerprint = manager.fingerprint();
    assert!(manager.is_current(&fingerprint));

    manager.handle_event(WalletEvent::AccountsChanged(vec![account(OTHER_ACCOUNT)]));

    assert!(!manager.is_current(&fingerprint));
}
