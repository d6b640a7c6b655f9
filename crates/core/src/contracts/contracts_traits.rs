//! Contract access seam traits.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use super::contracts_errors::ContractCallError;
use super::contracts_model::ContractHandle;

/// Read surface of one flavor contract.
///
/// The query interfaces deployed contracts expose are inconsistent:
/// `tokens_of_owner` and `total_supply` may be missing or revert, and the
/// fractional lookups only exist on the fractional flavor. Callers treat
/// per-method failure as capability absence, not a hard error.
#[async_trait]
pub trait NftContract: Send + Sync {
    /// Direct enumeration of owned token ids, where supported.
    async fn tokens_of_owner(&self, owner: Address) -> Result<Vec<U256>, ContractCallError>;

    async fn balance_of(&self, owner: Address) -> Result<U256, ContractCallError>;

    async fn owner_of(&self, token_id: U256) -> Result<Address, ContractCallError>;

    async fn token_uri(&self, token_id: U256) -> Result<String, ContractCallError>;

    async fn total_supply(&self) -> Result<U256, ContractCallError>;

    async fn is_fractionalized(&self, token_id: U256) -> Result<bool, ContractCallError>;

    /// The fungible share contract backing a fractionalized token.
    async fn fraction_token(&self, token_id: U256) -> Result<Address, ContractCallError>;

    /// Share balance of `owner` on a fraction-share contract.
    async fn share_balance_of(
        &self,
        share_token: Address,
        owner: Address,
    ) -> Result<U256, ContractCallError>;
}

/// Materializes a callable contract from a handle.
///
/// The seam between handle derivation and the wire; tests substitute
/// in-memory contracts here.
pub trait ContractConnector: Send + Sync {
    fn connect(&self, handle: &ContractHandle) -> Arc<dyn NftContract>;
}
