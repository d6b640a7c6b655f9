//! The wallet session state machine.

use std::sync::{Arc, RwLock};

use alloy_primitives::Address;
use log::{debug, info, warn};
use serde_json::{json, Value};

use super::session_errors::SessionError;
use super::session_model::{SessionFailure, SessionFingerprint, SessionStatus, WalletSession};
use crate::chains::{self, MAINNET_CHAIN_ID};
use crate::constants::{INTERACTIVE_REQUEST_TIMEOUT, WALLET_CALL_TIMEOUT};
use crate::errors::Result;
use crate::events::{SessionEvent, SessionEventSink};
use crate::provider::{parse_hex_u64, request_with_timeout, WalletEvent, WalletProvider, WalletRpcError};

/// Owner of the wallet session and the only place it mutates.
///
/// Caller operations (`connect`, `switch_chain`, `disconnect`) and
/// wallet-emitted events (`handle_event`) both funnel through here, so the
/// session is a single point of truth for the current (chain, account)
/// pair. Downstream components capture a [`SessionFingerprint`] before
/// async work and check it at completion instead of threading cancellation
/// tokens through the pipeline.
pub struct SessionManager {
    provider: Arc<dyn WalletProvider>,
    session: RwLock<WalletSession>,
    sink: Arc<dyn SessionEventSink>,
}

impl SessionManager {
    /// Create a manager over a located or paired wallet provider.
    pub fn new(provider: Arc<dyn WalletProvider>, sink: Arc<dyn SessionEventSink>) -> Self {
        Self {
            provider,
            session: RwLock::new(WalletSession::disconnected()),
            sink,
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> WalletSession {
        self.session.read().unwrap().clone()
    }

    /// Fingerprint of the current session, for stale-result discard.
    pub fn fingerprint(&self) -> SessionFingerprint {
        self.session.read().unwrap().fingerprint()
    }

    /// Whether a captured fingerprint still describes the current session.
    pub fn is_current(&self, fingerprint: &SessionFingerprint) -> bool {
        self.fingerprint() == *fingerprint
    }

    /// The wallet provider this session is bound to.
    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::clone(&self.provider)
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut WalletSession) -> R) -> R {
        let mut session = self.session.write().unwrap();
        f(&mut session)
    }

    fn fail(&self, failure: SessionFailure) {
        self.mutate(|s| {
            s.status = SessionStatus::Error;
            s.last_error = Some(failure);
            s.touch();
        });
    }

    /// Establish a session, prompting the user through the wallet.
    ///
    /// Binds the granted account and the wallet's current chain; when that
    /// chain differs from `target_chain` a switch is requested before the
    /// call returns. A declined prompt surfaces as
    /// [`SessionError::UserRejected`], distinct from any other failure.
    pub async fn connect(&self, target_chain: u64) -> Result<WalletSession> {
        chains::chain_by_id(target_chain).ok_or(SessionError::ChainNotRegistered(target_chain))?;

        self.mutate(|s| {
            s.status = SessionStatus::Connecting;
            s.last_error = None;
            s.touch();
        });

        let accounts = match request_with_timeout(
            self.provider.as_ref(),
            "eth_requestAccounts",
            Value::Null,
            INTERACTIVE_REQUEST_TIMEOUT,
        )
        .await
        {
            Ok(value) => value,
            Err(e) if e.is_user_rejection() => {
                self.fail(SessionFailure::Rejected);
                return Err(SessionError::UserRejected.into());
            }
            Err(e) => {
                self.fail(SessionFailure::Failed(e.to_string()));
                return Err(e.into());
            }
        };

        let account = match parse_accounts(&accounts) {
            Ok(Some(account)) => account,
            Ok(None) => {
                self.fail(SessionFailure::Failed("no accounts granted".into()));
                return Err(SessionError::NoAccounts.into());
            }
            Err(e) => {
                self.fail(SessionFailure::Failed(e.to_string()));
                return Err(e.into());
            }
        };

        let wallet_chain = match self.wallet_chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                self.fail(SessionFailure::Failed(e.to_string()));
                return Err(e.into());
            }
        };

        self.mutate(|s| {
            s.status = SessionStatus::Connected;
            s.account = Some(account);
            s.chain_id = Some(wallet_chain);
            s.chain_supported = chains::is_supported(wallet_chain);
            s.last_error = None;
            s.touch();
        });
        info!("wallet connected: {} on chain {}", account, wallet_chain);
        self.sink.emit(SessionEvent::Connected {
            account,
            chain_id: wallet_chain,
        });

        if wallet_chain != target_chain {
            self.switch_chain(target_chain).await?;
        }

        Ok(self.session())
    }

    /// Rebind a previously authorized session without prompting.
    ///
    /// Uses the non-interactive `eth_accounts` query; when the wallet
    /// holds no standing authorization the session is left untouched and
    /// `None` is returned.
    pub async fn restore(&self) -> Result<Option<WalletSession>> {
        if self.session().status != SessionStatus::Disconnected {
            return Ok(Some(self.session()));
        }

        let accounts = request_with_timeout(
            self.provider.as_ref(),
            "eth_accounts",
            Value::Null,
            WALLET_CALL_TIMEOUT,
        )
        .await?;

        let Some(account) = parse_accounts(&accounts)? else {
            debug!("no standing wallet authorization to restore");
            return Ok(None);
        };

        let wallet_chain = self.wallet_chain_id().await?;

        self.mutate(|s| {
            s.status = SessionStatus::Connected;
            s.account = Some(account);
            s.chain_id = Some(wallet_chain);
            s.chain_supported = chains::is_supported(wallet_chain);
            s.last_error = None;
            s.touch();
        });
        info!("wallet session restored: {} on chain {}", account, wallet_chain);
        self.sink.emit(SessionEvent::Connected {
            account,
            chain_id: wallet_chain,
        });

        Ok(Some(self.session()))
    }

    /// Ask the wallet to switch networks.
    ///
    /// A wallet that does not know the chain (error 4902) gets one
    /// add-chain request built from the registry descriptor, then one
    /// retried switch. Chain 1 is never auto-added. Any rejection leaves
    /// the session connected on its previous chain.
    pub async fn switch_chain(&self, target_chain: u64) -> Result<WalletSession> {
        let descriptor = chains::chain_by_id(target_chain)
            .ok_or(SessionError::ChainNotRegistered(target_chain))?;

        {
            let session = self.session();
            if !matches!(
                session.status,
                SessionStatus::Connected | SessionStatus::SwitchingChain
            ) {
                return Err(SessionError::NotConnected.into());
            }
        }

        self.mutate(|s| {
            s.status = SessionStatus::SwitchingChain;
            s.touch();
        });

        let params = json!([{ "chainId": descriptor.hex_id }]);
        let mut result = request_with_timeout(
            self.provider.as_ref(),
            "wallet_switchEthereumChain",
            params.clone(),
            INTERACTIVE_REQUEST_TIMEOUT,
        )
        .await;

        let chain_unknown = matches!(&result, Err(e) if e.is_unrecognized_chain());
        if chain_unknown && target_chain != MAINNET_CHAIN_ID {
            debug!("wallet lacks chain {}, issuing add-chain request", target_chain);
            let added = request_with_timeout(
                self.provider.as_ref(),
                "wallet_addEthereumChain",
                json!([descriptor.add_chain_params()]),
                INTERACTIVE_REQUEST_TIMEOUT,
            )
            .await;
            result = match added {
                Ok(_) => {
                    request_with_timeout(
                        self.provider.as_ref(),
                        "wallet_switchEthereumChain",
                        params,
                        INTERACTIVE_REQUEST_TIMEOUT,
                    )
                    .await
                }
                Err(add_error) => Err(add_error),
            };
        }

        match result {
            Ok(_) => {
                self.mutate(|s| {
                    s.status = SessionStatus::Connected;
                    s.chain_id = Some(target_chain);
                    s.chain_supported = true;
                    s.last_error = None;
                    s.touch();
                });
                info!("switched to chain {}", target_chain);
                self.sink.emit(SessionEvent::ChainChanged {
                    chain_id: target_chain,
                    supported: true,
                });
                Ok(self.session())
            }
            Err(e) => {
                // Recoverable: the session survives on its previous chain.
                let rejected = e.is_user_rejection();
                self.mutate(|s| {
                    s.status = SessionStatus::Connected;
                    s.last_error = Some(if rejected {
                        SessionFailure::Rejected
                    } else {
                        SessionFailure::Failed(e.to_string())
                    });
                    s.touch();
                });
                warn!("chain switch to {} failed: {}", target_chain, e);
                if rejected {
                    Err(SessionError::UserRejected.into())
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// End the session. Idempotent; re-disconnecting emits nothing.
    pub fn disconnect(&self) -> WalletSession {
        let transitioned = self.mutate(|s| {
            if s.status == SessionStatus::Disconnected {
                return false;
            }
            s.status = SessionStatus::Disconnected;
            s.account = None;
            s.chain_id = None;
            s.chain_supported = false;
            s.last_error = None;
            s.touch();
            true
        });

        if transitioned {
            info!("wallet disconnected");
            self.sink.emit(SessionEvent::Disconnected);
        }
        self.session()
    }

    /// Apply one wallet-emitted event to the session.
    ///
    /// Events are treated as inbound messages: each is applied exactly
    /// once and replays are no-ops, so an event delivered twice cannot
    /// change observable state the second time.
    pub fn handle_event(&self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => {
                    debug!("wallet revoked all accounts");
                    self.disconnect();
                }
                Some(&next) => {
                    let changed = self.mutate(|s| {
                        let bound = matches!(
                            s.status,
                            SessionStatus::Connected | SessionStatus::SwitchingChain
                        );
                        if !bound || s.account == Some(next) {
                            return false;
                        }
                        s.account = Some(next);
                        s.touch();
                        true
                    });
                    if changed {
                        info!("wallet account changed: {}", next);
                        self.sink.emit(SessionEvent::AccountChanged { account: next });
                    }
                }
            },
            WalletEvent::ChainChanged(chain_id) => {
                let supported = chains::is_supported(chain_id);
                let changed = self.mutate(|s| {
                    let bound = matches!(
                        s.status,
                        SessionStatus::Connected | SessionStatus::SwitchingChain
                    );
                    if !bound || (s.chain_id == Some(chain_id) && s.chain_supported == supported) {
                        return false;
                    }
                    s.chain_id = Some(chain_id);
                    s.chain_supported = supported;
                    s.touch();
                    true
                });
                if changed {
                    if supported {
                        info!("wallet chain changed: {}", chain_id);
                    } else {
                        warn!("wallet moved to unregistered chain {}", chain_id);
                    }
                    self.sink.emit(SessionEvent::ChainChanged { chain_id, supported });
                }
            }
            WalletEvent::Disconnected => {
                self.disconnect();
            }
        }
    }

    async fn wallet_chain_id(&self) -> std::result::Result<u64, WalletRpcError> {
        let value = request_with_timeout(
            self.provider.as_ref(),
            "eth_chainId",
            Value::Null,
            WALLET_CALL_TIMEOUT,
        )
        .await?;
        let raw = value
            .as_str()
            .ok_or_else(|| WalletRpcError::Malformed("chain id is not a string".into()))?;
        parse_hex_u64(raw)
    }
}

fn parse_accounts(value: &Value) -> std::result::Result<Option<Address>, WalletRpcError> {
    let list = value
        .as_array()
        .ok_or_else(|| WalletRpcError::Malformed("account list is not an array".into()))?;
    let Some(first) = list.first() else {
        return Ok(None);
    };
    let raw = first
        .as_str()
        .ok_or_else(|| WalletRpcError::Malformed("account entry is not a string".into()))?;
    raw.parse::<Address>()
        .map(Some)
        .map_err(|_| WalletRpcError::Malformed(format!("account address: {raw}")))
}
