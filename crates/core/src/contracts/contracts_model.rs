//! Flavor and handle value types.

use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// The parallel NFT contract variants the application manages as distinct
/// inventories.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Native,
    Soulbound,
    Fractional,
    Dynamic,
    Composable,
}

impl Flavor {
    pub const ALL: [Flavor; 5] = [
        Flavor::Native,
        Flavor::Soulbound,
        Flavor::Fractional,
        Flavor::Dynamic,
        Flavor::Composable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Soulbound => "soulbound",
            Self::Fractional => "fractional",
            Self::Dynamic => "dynamic",
            Self::Composable => "composable",
        }
    }

    /// Tag used in deployment environment variable names.
    pub fn env_tag(&self) -> &'static str {
        match self {
            Self::Native => "NATIVE",
            Self::Soulbound => "SOULBOUND",
            Self::Fractional => "FRACTIONAL",
            Self::Dynamic => "DYNAMIC",
            Self::Composable => "COMPOSABLE",
        }
    }

    /// Soulbound tokens stay with their owner; everything else moves.
    pub fn transferable(&self) -> bool {
        !matches!(self, Self::Soulbound)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bound contract reference for one (chain, flavor) pair.
///
/// Derived from the session, never persisted. The carried epoch pins the
/// handle to the session state it was minted from; using it after a chain
/// or account switch is rejected, never silently reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ContractHandle {
    pub address: Address,
    pub flavor: Flavor,
    pub chain_id: u64,
    /// Signer account the handle is bound to.
    pub account: Address,
    pub epoch: u64,
}
