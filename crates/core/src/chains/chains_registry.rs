//! Static registry of supported chains.

use lazy_static::lazy_static;

use super::chains_model::{ChainDescriptor, ChainLayer, NativeCurrency};

/// Ethereum mainnet. Never auto-added to a wallet; every wallet ships it.
pub const MAINNET_CHAIN_ID: u64 = 1;

const ETH: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

lazy_static! {
    static ref SUPPORTED_CHAINS: Vec<ChainDescriptor> = vec![
        ChainDescriptor {
            chain_id: 1,
            hex_id: "0x1",
            name: "Ethereum Mainnet",
            short_name: "Ethereum L1",
            env_tag: "MAINNET",
            native_currency: ETH,
            rpc_url: "https://cloudflare-eth.com",
            explorer_url: "https://etherscan.io",
            testnet: false,
            layer: ChainLayer::L1,
        },
        ChainDescriptor {
            chain_id: 11155111,
            hex_id: "0xaa36a7",
            name: "Ethereum Sepolia",
            short_name: "Sepolia Testnet",
            env_tag: "SEPOLIA",
            native_currency: NativeCurrency {
                name: "Sepolia Ether",
                symbol: "ETH",
                decimals: 18,
            },
            rpc_url: "https://rpc.sepolia.org",
            explorer_url: "https://sepolia.etherscan.io",
            testnet: true,
            layer: ChainLayer::L1,
        },
        ChainDescriptor {
            chain_id: 137,
            hex_id: "0x89",
            name: "Polygon",
            short_name: "Polygon",
            env_tag: "POLYGON",
            native_currency: NativeCurrency {
                name: "MATIC",
                symbol: "MATIC",
                decimals: 18,
            },
            rpc_url: "https://polygon-rpc.com",
            explorer_url: "https://polygonscan.com",
            testnet: false,
            layer: ChainLayer::L2,
        },
        ChainDescriptor {
            chain_id: 42161,
            hex_id: "0xa4b1",
            name: "Arbitrum One",
            short_name: "Arbitrum",
            env_tag: "ARBITRUM",
            native_currency: ETH,
            rpc_url: "https://arb1.arbitrum.io/rpc",
            explorer_url: "https://arbiscan.io",
            testnet: false,
            layer: ChainLayer::L2,
        },
        ChainDescriptor {
            chain_id: 10,
            hex_id: "0xa",
            name: "Optimism",
            short_name: "Optimism",
            env_tag: "OPTIMISM",
            native_currency: ETH,
            rpc_url: "https://mainnet.optimism.io",
            explorer_url: "https://optimistic.etherscan.io",
            testnet: false,
            layer: ChainLayer::L2,
        },
        ChainDescriptor {
            chain_id: 8453,
            hex_id: "0x2105",
            name: "Base",
            short_name: "Base",
            env_tag: "BASE",
            native_currency: ETH,
            rpc_url: "https://mainnet.base.org",
            explorer_url: "https://basescan.org",
            testnet: false,
            layer: ChainLayer::L2,
        },
    ];
}

/// All supported chain descriptors, in registration order.
pub fn supported_chains() -> &'static [ChainDescriptor] {
    &SUPPORTED_CHAINS
}

/// Look up a chain by its numeric id.
pub fn chain_by_id(chain_id: u64) -> Option<&'static ChainDescriptor> {
    SUPPORTED_CHAINS.iter().find(|c| c.chain_id == chain_id)
}

/// Look up a chain by its 0x-prefixed hex id (case-insensitive).
pub fn chain_by_hex(hex_id: &str) -> Option<&'static ChainDescriptor> {
    SUPPORTED_CHAINS
        .iter()
        .find(|c| c.hex_id.eq_ignore_ascii_case(hex_id))
}

pub fn is_supported(chain_id: u64) -> bool {
    chain_by_id(chain_id).is_some()
}

/// Chains grouped by settlement layer, for presentation.
pub fn chains_by_layer(layer: ChainLayer) -> Vec<&'static ChainDescriptor> {
    SUPPORTED_CHAINS.iter().filter(|c| c.layer == layer).collect()
}
