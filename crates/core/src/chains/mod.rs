//! Chains module - supported chain descriptors and the static registry.

mod chains_model;
mod chains_registry;

pub use chains_model::{ChainDescriptor, ChainLayer, NativeCurrency};
pub use chains_registry::{
    chain_by_hex, chain_by_id, chains_by_layer, is_supported, supported_chains, MAINNET_CHAIN_ID,
};
