//! Owned-asset value types.

use alloy_primitives::Address;
use serde::Serialize;

use crate::contracts::Flavor;
use mintfolio_metadata::MetadataRecord;

/// Extra state for a token held through a fungible share contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FractionalPosition {
    pub share_token: Address,
    /// Decimal string; share supplies can exceed safe integer range.
    pub share_balance: String,
    /// True when the account also owns the NFT itself.
    pub direct_owner: bool,
}

/// One owned token.
///
/// Uniquely identified by (flavor, chain id, token id); the same token id
/// may legitimately repeat across flavors and chains.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NftAsset {
    /// Decimal string; ids can exceed safe integer range.
    pub token_id: String,
    pub flavor: Flavor,
    pub contract: Address,
    pub chain_id: u64,
    pub token_uri: Option<String>,
    /// `None` after resolution means the metadata is unavailable; the
    /// asset itself is still listed.
    pub metadata: Option<MetadataRecord>,
    pub fractional: Option<FractionalPosition>,
}

impl NftAsset {
    /// The identity this asset is deduplicated and indexed under.
    pub fn key(&self) -> (Flavor, u64, &str) {
        (self.flavor, self.chain_id, &self.token_id)
    }
}
