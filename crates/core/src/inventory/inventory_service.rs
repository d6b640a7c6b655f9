//! Per-flavor NFT inventory resolution.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use log::{debug, warn};

use super::inventory_model::{FractionalPosition, NftAsset};
use crate::constants::{
    DEFAULT_SCAN_WINDOW, MAX_SCAN_WINDOW, METADATA_CONCURRENCY, SCAN_CONCURRENCY,
};
use crate::contracts::{ContractConnector, ContractError, Flavor, HandleFactory, NftContract};
use crate::errors::{Error, Result};
use crate::session::SessionManager;
use mintfolio_metadata::{GatewayRegistry, ResolutionOutcome};

/// Enumerates the NFTs an account owns, flavor by flavor.
///
/// Each flavor resolves independently: a missing deployment, an absent
/// enumeration method, or a revert degrades that flavor to an empty
/// contribution and never aborts the whole listing. The aggregate is the
/// union across flavors that succeeded.
pub struct InventoryService {
    session: Arc<SessionManager>,
    factory: Arc<HandleFactory>,
    connector: Arc<dyn ContractConnector>,
    metadata: Arc<GatewayRegistry>,
}

impl InventoryService {
    pub fn new(
        session: Arc<SessionManager>,
        factory: Arc<HandleFactory>,
        connector: Arc<dyn ContractConnector>,
        metadata: Arc<GatewayRegistry>,
    ) -> Self {
        Self {
            session,
            factory,
            connector,
            metadata,
        }
    }

    /// List the session account's tokens across `flavors`.
    ///
    /// The session fingerprint is captured at entry; if the session
    /// changes while the listing is in flight the result is discarded and
    /// [`Error::StaleSession`] returned, so a stale batch can never
    /// overwrite state derived from a newer session.
    ///
    /// Ordering: within a flavor, direct enumeration keeps the
    /// provider-returned order and the fallback scan yields ascending ids;
    /// no cross-flavor order is guaranteed beyond the `flavors` argument
    /// order.
    pub async fn list_owned(&self, flavors: &[Flavor]) -> Result<Vec<NftAsset>> {
        let snapshot = self.session.session();
        if !snapshot.is_connected() {
            return Err(ContractError::NoSession.into());
        }
        let account = snapshot.account.ok_or(ContractError::NoSession)?;
        let fingerprint = snapshot.fingerprint();

        let per_flavor = join_all(
            flavors
                .iter()
                .map(|flavor| self.resolve_flavor(*flavor, account)),
        )
        .await;

        let mut assets = Vec::new();
        for (flavor, outcome) in flavors.iter().zip(per_flavor) {
            match outcome {
                Ok(mut found) => assets.append(&mut found),
                Err(e) => warn!("{} inventory degraded to empty: {}", flavor, e),
            }
        }

        if !self.session.is_current(&fingerprint) {
            debug!("discarding inventory batch: session changed mid-enumeration");
            return Err(Error::StaleSession);
        }

        let assets = stream::iter(assets)
            .map(|mut asset| async move {
                if let Some(uri) = asset.token_uri.clone() {
                    match self.metadata.resolve(&uri).await {
                        ResolutionOutcome::Resolved(record) => asset.metadata = Some(record),
                        ResolutionOutcome::Unavailable => {
                            debug!("metadata unavailable for {} #{}", asset.flavor, asset.token_id)
                        }
                    }
                }
                asset
            })
            .buffered(METADATA_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        if !self.session.is_current(&fingerprint) {
            debug!("discarding inventory batch: session changed mid-resolution");
            return Err(Error::StaleSession);
        }

        Ok(assets)
    }

    async fn resolve_flavor(&self, flavor: Flavor, account: Address) -> Result<Vec<NftAsset>> {
        let handle = self.factory.handle(flavor)?;
        let contract = self.connector.connect(&handle);

        let mut ids = match contract.tokens_of_owner(account).await {
            Ok(ids) => ids,
            Err(e) => {
                // A missing method and a revert both mean "direct
                // enumeration unsupported", not a hard error.
                debug!(
                    "{} direct enumeration unavailable on chain {}: {}",
                    flavor, handle.chain_id, e
                );
                self.scan_owned(Arc::clone(&contract), account).await?
            }
        };

        let mut positions: HashMap<U256, FractionalPosition> = HashMap::new();
        if flavor == Flavor::Fractional {
            let direct: HashSet<U256> = ids.iter().copied().collect();
            positions.extend(
                self.annotate_direct_holdings(Arc::clone(&contract), account, &direct)
                    .await,
            );
            for (id, position) in self
                .scan_share_positions(Arc::clone(&contract), account, &direct)
                .await
            {
                positions.insert(id, position);
                ids.push(id);
            }
        }

        let positions = &positions;
        let contract_ref = &contract;
        let assets = stream::iter(ids)
            .map(|id| async move {
                // Individual URI failures leave the asset listed with no
                // metadata rather than dropping it.
                let token_uri = contract_ref.token_uri(id).await.ok();
                NftAsset {
                    token_id: id.to_string(),
                    flavor,
                    contract: handle.address,
                    chain_id: handle.chain_id,
                    token_uri,
                    metadata: None,
                    fractional: positions.get(&id).cloned(),
                }
            })
            .buffered(SCAN_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        Ok(assets)
    }

    /// Fallback enumeration: probe ownership across a bounded id window.
    ///
    /// The window is the contract's reported supply capped at
    /// [`MAX_SCAN_WINDOW`], so the scan terminates even against a
    /// malicious supply; a contract that reports none gets
    /// [`DEFAULT_SCAN_WINDOW`]. Probes run concurrently and per-id
    /// failures (burned or never-minted ids) are excluded, not propagated.
    async fn scan_owned(
        &self,
        contract: Arc<dyn NftContract>,
        account: Address,
    ) -> Result<Vec<U256>> {
        let balance = contract
            .balance_of(account)
            .await
            .map_err(ContractError::from)?;
        if balance.is_zero() {
            return Ok(Vec::new());
        }

        let window = scan_window(contract.as_ref()).await;
        let mut owned: Vec<U256> = stream::iter(1..=window)
            .map(|raw_id| {
                let contract = Arc::clone(&contract);
                async move {
                    let id = U256::from(raw_id);
                    match contract.owner_of(id).await {
                        Ok(owner) if owner == account => Some(id),
                        _ => None,
                    }
                }
            })
            .buffer_unordered(SCAN_CONCURRENCY)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        owned.sort_unstable();
        Ok(owned)
    }

    /// Derived-state detection for tokens the account owns directly:
    /// a fractionalized token carries its share contract and the
    /// account's balance on it.
    async fn annotate_direct_holdings(
        &self,
        contract: Arc<dyn NftContract>,
        account: Address,
        direct: &HashSet<U256>,
    ) -> Vec<(U256, FractionalPosition)> {
        stream::iter(direct.iter().copied())
            .map(|id| {
                let contract = Arc::clone(&contract);
                async move {
                    let fractionalized = contract.is_fractionalized(id).await.ok()?;
                    if !fractionalized {
                        return None;
                    }
                    let share_token = contract.fraction_token(id).await.ok()?;
                    let share_balance = contract.share_balance_of(share_token, account).await.ok()?;
                    Some((
                        id,
                        FractionalPosition {
                            share_token,
                            share_balance: share_balance.to_string(),
                            direct_owner: true,
                        },
                    ))
                }
            })
            .buffer_unordered(SCAN_CONCURRENCY)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Fractional side lookup: tokens the account does not own directly
    /// but holds shares of, via each token's fraction-share contract.
    async fn scan_share_positions(
        &self,
        contract: Arc<dyn NftContract>,
        account: Address,
        direct: &HashSet<U256>,
    ) -> Vec<(U256, FractionalPosition)> {
        let window = scan_window(contract.as_ref()).await;
        let mut positions: Vec<(U256, FractionalPosition)> = stream::iter(1..=window)
            .map(|raw_id| {
                let contract = Arc::clone(&contract);
                async move {
                    let id = U256::from(raw_id);
                    if direct.contains(&id) {
                        return None;
                    }
                    let fractionalized = contract.is_fractionalized(id).await.ok()?;
                    if !fractionalized {
                        return None;
                    }
                    let share_token = contract.fraction_token(id).await.ok()?;
                    let share_balance = contract.share_balance_of(share_token, account).await.ok()?;
                    if share_balance.is_zero() {
                        return None;
                    }
                    Some((
                        id,
                        FractionalPosition {
                            share_token,
                            share_balance: share_balance.to_string(),
                            direct_owner: false,
                        },
                    ))
                }
            })
            .buffer_unordered(SCAN_CONCURRENCY)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        positions.sort_unstable_by_key(|(id, _)| *id);
        positions
    }
}

async fn scan_window(contract: &dyn NftContract) -> u64 {
    match contract.total_supply().await {
        Ok(supply) if supply > U256::from(MAX_SCAN_WINDOW) => {
            warn!(
                "contract reports {} issued tokens; capping scan at {}",
                supply, MAX_SCAN_WINDOW
            );
            MAX_SCAN_WINDOW
        }
        Ok(supply) => supply.to::<u64>(),
        Err(_) => DEFAULT_SCAN_WINDOW,
    }
}
