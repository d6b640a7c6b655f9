//! Deployed contract addresses per (chain, flavor).

use std::collections::HashMap;

use alloy_primitives::Address;
use log::{debug, warn};

use super::contracts_model::Flavor;
use crate::chains::supported_chains;

/// Address table for deployed flavor contracts.
///
/// Populated from `MINTFOLIO_<CHAIN>_<FLAVOR>_ADDRESS` environment
/// variables (e.g. `MINTFOLIO_SEPOLIA_NATIVE_ADDRESS`) or registered
/// programmatically. An absent entry means the flavor is not deployed on
/// that chain.
#[derive(Clone, Debug, Default)]
pub struct DeploymentRegistry {
    addresses: HashMap<(u64, Flavor), Address>,
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `MINTFOLIO_<CHAIN>_<FLAVOR>_ADDRESS` variable present in
    /// the environment. Unparseable values are skipped with a warning
    /// rather than failing startup.
    pub fn from_env() -> Self {
        let mut registry = Self::new();
        for chain in supported_chains() {
            for flavor in Flavor::ALL {
                let key = format!(
                    "MINTFOLIO_{}_{}_ADDRESS",
                    chain.env_tag,
                    flavor.env_tag()
                );
                let Ok(raw) = std::env::var(&key) else {
                    continue;
                };
                match raw.parse::<Address>() {
                    Ok(address) => {
                        debug!("registered {} deployment on {}: {}", flavor, chain.name, address);
                        registry.register(chain.chain_id, flavor, address);
                    }
                    Err(_) => warn!("ignoring {}: not an address: {}", key, raw),
                }
            }
        }
        registry
    }

    pub fn register(&mut self, chain_id: u64, flavor: Flavor, address: Address) {
        self.addresses.insert((chain_id, flavor), address);
    }

    pub fn address_of(&self, chain_id: u64, flavor: Flavor) -> Option<Address> {
        self.addresses.get(&(chain_id, flavor)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = DeploymentRegistry::new();
        registry.register(11155111, Flavor::Native, test_address(0x11));

        assert_eq!(
            registry.address_of(11155111, Flavor::Native),
            Some(test_address(0x11))
        );
        assert_eq!(registry.address_of(11155111, Flavor::Soulbound), None);
        assert_eq!(registry.address_of(1, Flavor::Native), None);
    }

    #[test]
    fn test_same_flavor_differs_per_chain() {
        let mut registry = DeploymentRegistry::new();
        registry.register(11155111, Flavor::Native, test_address(0x11));
        registry.register(137, Flavor::Native, test_address(0x22));

        assert_ne!(
            registry.address_of(11155111, Flavor::Native),
            registry.address_of(137, Flavor::Native)
        );
    }
}
