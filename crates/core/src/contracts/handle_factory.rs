//! Contract handle derivation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::contracts_errors::ContractError;
use super::contracts_model::{ContractHandle, Flavor};
use super::deployments::DeploymentRegistry;
use crate::session::SessionManager;

/// Derives contract handles from the current session.
///
/// Deterministic: the same (chain, flavor) pair always resolves to the
/// same address. Handles are memoized by (chain, flavor, account) since
/// the signer is account-bound; a memoized handle whose epoch no longer
/// matches the session is re-derived, never reused.
pub struct HandleFactory {
    session: Arc<SessionManager>,
    deployments: DeploymentRegistry,
    memo: Mutex<HashMap<(u64, Flavor, alloy_primitives::Address), ContractHandle>>,
}

impl HandleFactory {
    pub fn new(session: Arc<SessionManager>, deployments: DeploymentRegistry) -> Self {
        Self {
            session,
            deployments,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// A handle for `flavor` on the session's current chain.
    ///
    /// Fails with [`ContractError::NoSession`] unless the session is
    /// connected, and with [`ContractError::UnsupportedChain`] when the
    /// chain is unregistered or carries no deployment for the flavor.
    pub fn handle(&self, flavor: Flavor) -> Result<ContractHandle, ContractError> {
        let session = self.session.session();
        if !session.is_connected() {
            return Err(ContractError::NoSession);
        }
        let (Some(chain_id), Some(account)) = (session.chain_id, session.account) else {
            return Err(ContractError::NoSession);
        };
        if !session.chain_supported {
            return Err(ContractError::UnsupportedChain { chain_id, flavor });
        }

        let address = self
            .deployments
            .address_of(chain_id, flavor)
            .ok_or(ContractError::UnsupportedChain { chain_id, flavor })?;

        let epoch = session.epoch();
        let mut memo = self.memo.lock().unwrap();
        let entry = memo
            .entry((chain_id, flavor, account))
            .or_insert(ContractHandle {
                address,
                flavor,
                chain_id,
                account,
                epoch,
            });
        if entry.epoch != epoch {
            entry.epoch = epoch;
        }
        Ok(*entry)
    }

    /// Reject a handle minted before the last session change.
    pub fn ensure_current(&self, handle: &ContractHandle) -> Result<(), ContractError> {
        if self.session.session().epoch() == handle.epoch {
            Ok(())
        } else {
            Err(ContractError::StaleHandle {
                flavor: handle.flavor,
            })
        }
    }
}
