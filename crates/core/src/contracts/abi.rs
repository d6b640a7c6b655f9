//! ABI bindings and the eth_call plumbing.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use serde_json::json;

use super::contracts_errors::ContractCallError;
use crate::constants::WALLET_CALL_TIMEOUT;
use crate::provider::{request_with_timeout, WalletProvider, WalletRpcError};

sol! {
    /// Query and mutation surface shared by every flavor contract.
    /// `tokensOfOwner` and `totalSupply` are optional extensions; callers
    /// treat their absence as "direct enumeration unsupported".
    interface IFlavorNft {
        function ownerOf(uint256 tokenId) external view returns (address);
        function balanceOf(address owner) external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string);
        function tokensOfOwner(address owner) external view returns (uint256[]);
        function totalSupply() external view returns (uint256);
        function mintWithURI(address to, string uri) external returns (uint256);
        function burn(uint256 tokenId) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function fractionalize(uint256 tokenId, uint256 shares) external;
        function isFractionalized(uint256 tokenId) external view returns (bool);
        function fractionToken(uint256 tokenId) external view returns (address);
    }

    /// Standard fungible surface of a fraction-share token.
    interface IFractionShare {
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Execute one read-only contract call through the wallet provider.
pub(crate) async fn eth_call<C: SolCall>(
    provider: &dyn WalletProvider,
    to: Address,
    call: C,
) -> Result<C::Return, ContractCallError> {
    let data = Bytes::from(call.abi_encode());
    let params = json!([{ "to": to, "data": data }, "latest"]);

    let value = request_with_timeout(provider, "eth_call", params, WALLET_CALL_TIMEOUT).await?;
    let raw = value
        .as_str()
        .ok_or_else(|| WalletRpcError::Malformed("eth_call result is not a string".into()))?;
    let returned =
        Bytes::from_str(raw).map_err(|e| ContractCallError::Decode(format!("{raw}: {e}")))?;

    C::abi_decode_returns(&returned).map_err(|e| ContractCallError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_selectors_match_erc721() {
        // Known ERC-721 selectors; a drift here would call the wrong method.
        assert_eq!(IFlavorNft::ownerOfCall::SELECTOR, [0x63, 0x52, 0x21, 0x1e]);
        assert_eq!(IFlavorNft::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(IFlavorNft::tokenURICall::SELECTOR, [0xc8, 0x7b, 0x56, 0xdd]);
        assert_eq!(IFlavorNft::totalSupplyCall::SELECTOR, [0x18, 0x16, 0x0d, 0xdd]);
        assert_eq!(
            IFlavorNft::transferFromCall::SELECTOR,
            [0x23, 0xb8, 0x72, 0xdd]
        );
    }

    #[test]
    fn test_owner_of_calldata_layout() {
        let call = IFlavorNft::ownerOfCall {
            tokenId: U256::from(7),
        };
        let encoded = call.abi_encode();
        // 4-byte selector + one 32-byte word.
        assert_eq!(encoded.len(), 36);
        assert_eq!(encoded[35], 7);
    }
}
