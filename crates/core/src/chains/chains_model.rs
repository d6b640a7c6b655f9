//! Chain descriptor value types.

use serde::Serialize;
use serde_json::{json, Value};

/// Native currency of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Settlement layer grouping, for presentation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ChainLayer {
    L1,
    L2,
}

/// Immutable descriptor for one supported EVM chain.
///
/// Defined once at process start and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChainDescriptor {
    pub chain_id: u64,
    /// EIP-155 id in the 0x-prefixed hex form wallets speak.
    pub hex_id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    /// Tag used in deployment environment variable names.
    pub env_tag: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub testnet: bool,
    pub layer: ChainLayer,
}

impl ChainDescriptor {
    /// Explorer URL for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Explorer URL for an account or contract address.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }

    /// Parameter object for a `wallet_addEthereumChain` request.
    pub fn add_chain_params(&self) -> Value {
        json!({
            "chainId": self.hex_id,
            "chainName": self.name,
            "nativeCurrency": {
                "name": self.native_currency.name,
                "symbol": self.native_currency.symbol,
                "decimals": self.native_currency.decimals,
            },
            "rpcUrls": [self.rpc_url],
            "blockExplorerUrls": [self.explorer_url],
        })
    }
}
