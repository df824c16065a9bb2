use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::utils::format_units;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use serde_json::{Value, json};

use roast_common::bounded::bounded;
use roast_common::types::AddressQuery;

use crate::{SourceError, WalletSource};

/// Decimals of the USDC token contract.
const USDC_DECIMALS: u8 = 6;

sol! {
    function balanceOf(address owner) external view returns (uint256);
}

/// JSON-RPC channel to the Arc Testnet node.
///
/// Each call is bounded by the configured RPC timeout.
pub struct ArcRpc {
    provider: DynProvider,
    timeout: Duration,
}

impl ArcRpc {
    pub fn new(rpc_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse()?)
            .erased();
        Ok(Self { provider, timeout })
    }

    /// Send a raw JSON-RPC request and return its `result` untouched.
    async fn request(&self, method: &'static str, params: Value) -> Result<Value, SourceError> {
        bounded(self.timeout, async {
            let result: Value = self.provider.raw_request(method.into(), params).await?;
            Ok(result)
        })
        .await
    }
}

/// `eth_getTransactionCount(address, "latest")`.
pub struct TxCountSource {
    rpc: Arc<ArcRpc>,
}

impl TxCountSource {
    pub fn new(rpc: Arc<ArcRpc>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl WalletSource for TxCountSource {
    type Output = u64;

    async fn fetch(&self, address: &AddressQuery) -> Result<u64, SourceError> {
        let result = self
            .rpc
            .request("eth_getTransactionCount", json!([address.as_str(), "latest"]))
            .await?;
        let tx_count = parse_quantity(&result);
        tracing::debug!(address = %address, tx_count, "Fetched transaction count");
        Ok(tx_count)
    }

    fn name(&self) -> &'static str {
        "tx_count"
    }
}

/// USDC `balanceOf(address)` through `eth_call`, in whole tokens.
pub struct UsdcBalanceSource {
    rpc: Arc<ArcRpc>,
    token: Address,
}

impl UsdcBalanceSource {
    pub fn new(rpc: Arc<ArcRpc>, token: &str) -> anyhow::Result<Self> {
        let token = token
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid USDC contract address {}: {}", token, e))?;
        Ok(Self { rpc, token })
    }
}

#[async_trait]
impl WalletSource for UsdcBalanceSource {
    type Output = f64;

    async fn fetch(&self, address: &AddressQuery) -> Result<f64, SourceError> {
        let calldata = balance_of_calldata(address)?;
        let result = self
            .rpc
            .request(
                "eth_call",
                json!([{ "to": self.token, "data": calldata }, "latest"]),
            )
            .await?;
        let balance = parse_token_amount(&result, USDC_DECIMALS)?;
        tracing::debug!(address = %address, balance, "Fetched USDC balance");
        Ok(balance)
    }

    fn name(&self) -> &'static str {
        "usdc_balance"
    }
}

/// ABI-encode `balanceOf(owner)`: selector `0x70a08231` plus the 32-byte
/// left-padded address.
pub fn balance_of_calldata(owner: &AddressQuery) -> Result<Bytes, SourceError> {
    let owner: Address = owner
        .as_str()
        .parse()
        .map_err(|e| SourceError::Malformed(format!("address {}: {}", owner, e)))?;
    Ok(balanceOfCall { owner }.abi_encode().into())
}

/// Parse a hex quantity such as `"0x1a"`. Anything unparseable counts as 0.
pub fn parse_quantity(value: &Value) -> u64 {
    value
        .as_str()
        .map(strip_hex_prefix)
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .unwrap_or(0)
}

/// Convert a hex-encoded token amount to whole units.
///
/// An empty result (`"0x"` or `null`) means the contract returned nothing and
/// is read as a zero balance.
pub fn parse_token_amount(value: &Value, decimals: u8) -> Result<f64, SourceError> {
    let digits = match value.as_str().map(strip_hex_prefix) {
        None | Some("") => return Ok(0.0),
        Some(digits) => digits,
    };

    let raw = U256::from_str_radix(digits, 16)
        .map_err(|e| SourceError::Malformed(format!("token amount {:?}: {}", digits, e)))?;
    let units = format_units(raw, decimals)
        .map_err(|e| SourceError::Malformed(format!("token amount {}: {}", raw, e)))?;
    units
        .parse::<f64>()
        .map_err(|e| SourceError::Malformed(format!("token amount {}: {}", units, e)))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
