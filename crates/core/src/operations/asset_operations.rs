//! Mint/transfer/burn/fractionalize pass-throughs.
//!
//! These stay thin: a handle is minted, calldata encoded, and the
//! transaction routed through the wallet. Ownership and transferability
//! invariants live in the contracts; the only local guard is refusing a
//! soulbound transfer before any wallet round-trip.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use log::info;
use serde_json::{json, Value};

use crate::constants::{
    INTERACTIVE_REQUEST_TIMEOUT, RECEIPT_POLL_INTERVAL, RECEIPT_WAIT_TIMEOUT, WALLET_CALL_TIMEOUT,
};
use crate::contracts::{ContractError, ContractHandle, Flavor, HandleFactory, IFlavorNft};
use crate::errors::Result;
use crate::provider::{parse_hex_u64, request_with_timeout, WalletProvider, WalletRpcError};
use crate::session::SessionManager;

/// Result of a submitted transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    /// Token id observed in the receipt's transfer event, when present.
    pub token_id: Option<String>,
}

/// Transaction surface over the flavor contracts.
pub struct AssetOperations {
    session: Arc<SessionManager>,
    factory: Arc<HandleFactory>,
}

impl AssetOperations {
    pub fn new(session: Arc<SessionManager>, factory: Arc<HandleFactory>) -> Self {
        Self { session, factory }
    }

    /// Mint a token to `recipient` with an already-uploaded metadata URI.
    pub async fn mint_with_uri(
        &self,
        flavor: Flavor,
        recipient: Address,
        token_uri: &str,
    ) -> Result<TxOutcome> {
        let handle = self.factory.handle(flavor)?;
        let call = IFlavorNft::mintWithURICall {
            to: recipient,
            uri: token_uri.to_string(),
        };
        self.send(&handle, call.abi_encode()).await
    }

    /// Transfer a token out of the session account.
    pub async fn transfer(&self, flavor: Flavor, to: Address, token_id: U256) -> Result<TxOutcome> {
        if !flavor.transferable() {
            return Err(ContractError::SoulboundTransfer.into());
        }
        let handle = self.factory.handle(flavor)?;
        let call = IFlavorNft::transferFromCall {
            from: handle.account,
            to,
            tokenId: token_id,
        };
        self.send(&handle, call.abi_encode()).await
    }

    pub async fn burn(&self, flavor: Flavor, token_id: U256) -> Result<TxOutcome> {
        let handle = self.factory.handle(flavor)?;
        let call = IFlavorNft::burnCall { tokenId: token_id };
        self.send(&handle, call.abi_encode()).await
    }

    /// Lock a fractional-flavor token and issue `shares` fungible shares.
    pub async fn fractionalize(&self, token_id: U256, shares: U256) -> Result<TxOutcome> {
        let handle = self.factory.handle(Flavor::Fractional)?;
        let call = IFlavorNft::fractionalizeCall {
            tokenId: token_id,
            shares,
        };
        self.send(&handle, call.abi_encode()).await
    }

    async fn send(&self, handle: &ContractHandle, data: Vec<u8>) -> Result<TxOutcome> {
        self.factory.ensure_current(handle)?;
        let provider = self.session.provider();

        let params = json!([{
            "from": handle.account,
            "to": handle.address,
            "data": Bytes::from(data),
        }]);
        let value = request_with_timeout(
            provider.as_ref(),
            "eth_sendTransaction",
            params,
            INTERACTIVE_REQUEST_TIMEOUT,
        )
        .await?;
        let tx_hash = value
            .as_str()
            .ok_or_else(|| WalletRpcError::Malformed("transaction hash is not a string".into()))?
            .to_string();
        info!("transaction submitted: {}", tx_hash);

        let receipt = wait_for_receipt(provider.as_ref(), &tx_hash).await?;
        receipt_outcome(tx_hash, &receipt)
    }
}

/// Poll for the receipt until it lands or the budget runs out.
async fn wait_for_receipt(provider: &dyn WalletProvider, tx_hash: &str) -> Result<Value> {
    let deadline = tokio::time::Instant::now() + RECEIPT_WAIT_TIMEOUT;
    loop {
        let value = request_with_timeout(
            provider,
            "eth_getTransactionReceipt",
            json!([tx_hash]),
            WALLET_CALL_TIMEOUT,
        )
        .await?;
        if !value.is_null() {
            return Ok(value);
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(WalletRpcError::Timeout {
                method: "eth_getTransactionReceipt".to_string(),
            }
            .into());
        }
        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
}

fn receipt_outcome(tx_hash: String, receipt: &Value) -> Result<TxOutcome> {
    if receipt.get("status").and_then(Value::as_str) == Some("0x0") {
        return Err(ContractError::Reverted(tx_hash).into());
    }

    let block_number = receipt
        .get("blockNumber")
        .and_then(Value::as_str)
        .and_then(|raw| parse_hex_u64(raw).ok());
    let token_id = minted_token_id(receipt);

    Ok(TxOutcome {
        tx_hash,
        block_number,
        token_id,
    })
}

/// Token id from the first Transfer-shaped log (indexed id in topic 3).
fn minted_token_id(receipt: &Value) -> Option<String> {
    let logs = receipt.get("logs")?.as_array()?;
    let log = logs.iter().find(|log| {
        log.get("topics")
            .and_then(Value::as_array)
            .is_some_and(|topics| topics.len() >= 4)
    })?;
    let topic = log["topics"][3].as_str()?;
    U256::from_str_radix(topic.trim_start_matches("0x"), 16)
        .ok()
        .map(|id| id.to_string())
}
