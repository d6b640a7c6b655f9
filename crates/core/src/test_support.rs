//! Shared test doubles.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::events::MockSessionEventSink;
use crate::provider::{WalletProvider, WalletRpcError};
use crate::session::SessionManager;

pub(crate) const TEST_ACCOUNT: &str = "0xaaaa00000000000000000000000000000000aaaa";
pub(crate) const OTHER_ACCOUNT: &str = "0xbbbb00000000000000000000000000000000bbbb";
pub(crate) const SEPOLIA: u64 = 11155111;

/// Scripted wallet provider: responses are queued per method and handed
/// out in order; anything unscripted fails loudly.
pub(crate) struct MockWalletProvider {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, WalletRpcError>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockWalletProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, method: &str, response: Result<Value, WalletRpcError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Methods called so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    pub fn params_of(&self, index: usize) -> Value {
        self.calls.lock().unwrap()[index].1.clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Script a successful connect handshake for `account` on `chain_hex`.
    pub fn script_connect(&self, account: &str, chain_hex: &str) {
        self.push("eth_requestAccounts", Ok(json!([account])));
        self.push("eth_chainId", Ok(json!(chain_hex)));
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletRpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        self.responses
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(WalletRpcError::Transport(format!(
                    "unscripted request: {method}"
                )))
            })
    }
}

/// A manager already connected as [`TEST_ACCOUNT`] on Sepolia.
pub(crate) async fn connected_manager() -> (
    Arc<SessionManager>,
    Arc<MockWalletProvider>,
    MockSessionEventSink,
) {
    let provider = MockWalletProvider::new();
    provider.script_connect(TEST_ACCOUNT, "0xaa36a7");

    let sink = MockSessionEventSink::new();
    let manager = Arc::new(SessionManager::new(
        provider.clone(),
        Arc::new(sink.clone()),
    ));
    manager
        .connect(SEPOLIA)
        .await
        .expect("scripted connect succeeds");

    (manager, provider, sink)
}
