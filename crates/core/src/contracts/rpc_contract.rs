//! Wallet-provider-backed contract access.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use super::abi::{eth_call, IFlavorNft, IFractionShare};
use super::contracts_errors::ContractCallError;
use super::contracts_model::ContractHandle;
use super::contracts_traits::{ContractConnector, NftContract};
use crate::provider::WalletProvider;

/// [`NftContract`] implementation issuing `eth_call` requests through the
/// wallet provider.
pub struct RpcNftContract {
    provider: Arc<dyn WalletProvider>,
    address: Address,
}

impl RpcNftContract {
    pub fn new(provider: Arc<dyn WalletProvider>, address: Address) -> Self {
        Self { provider, address }
    }
}

#[async_trait]
impl NftContract for RpcNftContract {
    async fn tokens_of_owner(&self, owner: Address) -> Result<Vec<U256>, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::tokensOfOwnerCall { owner },
        )
        .await
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::balanceOfCall { owner },
        )
        .await
    }

    async fn owner_of(&self, token_id: U256) -> Result<Address, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::ownerOfCall { tokenId: token_id },
        )
        .await
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::tokenURICall { tokenId: token_id },
        )
        .await
    }

    async fn total_supply(&self) -> Result<U256, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::totalSupplyCall {},
        )
        .await
    }

    async fn is_fractionalized(&self, token_id: U256) -> Result<bool, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::isFractionalizedCall { tokenId: token_id },
        )
        .await
    }

    async fn fraction_token(&self, token_id: U256) -> Result<Address, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            self.address,
            IFlavorNft::fractionTokenCall { tokenId: token_id },
        )
        .await
    }

    async fn share_balance_of(
        &self,
        share_token: Address,
        owner: Address,
    ) -> Result<U256, ContractCallError> {
        eth_call(
            self.provider.as_ref(),
            share_token,
            IFractionShare::balanceOfCall { owner },
        )
        .await
    }
}

/// Default connector: every handle becomes an [`RpcNftContract`] over the
/// session's wallet provider.
pub struct RpcContractConnector {
    provider: Arc<dyn WalletProvider>,
}

impl RpcContractConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }
}

impl ContractConnector for RpcContractConnector {
    fn connect(&self, handle: &ContractHandle) -> Arc<dyn NftContract> {
        Arc::new(RpcNftContract::new(
            Arc::clone(&self.provider),
            handle.address,
        ))
    }
}
