use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Maximum number of explorer transactions carried in a snapshot.
pub const MAX_RECENT_TXS: usize = 5;

// Lowercase `0x` prefix only; `0X...` is rejected.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is a valid regex")
});

/// A wallet address that passed format validation.
///
/// Only constructible through [`AddressQuery::parse`], so holding one means no
/// outbound call can be made with a malformed address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Trim `raw` and accept it only if it is `0x` followed by 40 hex digits.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if !ADDRESS_PATTERN.is_match(trimmed) {
            return Err(AppError::invalid_address());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Pull the `address` field out of a decoded request body.
    ///
    /// A missing or non-string field is treated like an empty address.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        let raw = body
            .get("address")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Self::parse(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One explorer transaction, reduced to the fields the roast needs.
///
/// Values are passed through exactly as the explorer reports them, whatever
/// their JSON type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentTx {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Value>,
    #[serde(rename = "timeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<Value>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<Value>,
}

impl RecentTx {
    /// Pick `hash`, `timeStamp` and `isError` out of one explorer entry.
    ///
    /// Never fails: absent keys (or a non-object entry) leave the field empty.
    pub fn from_explorer(entry: &Value) -> Self {
        Self {
            hash: entry.get("hash").cloned(),
            time_stamp: entry.get("timeStamp").cloned(),
            is_error: entry.get("isError").cloned(),
        }
    }
}

/// On-chain facts gathered for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    pub address: AddressQuery,
    pub tx_count: u64,
    /// USDC balance in whole tokens; 0 when the lookup failed
    pub usdc_balance: f64,
    /// Newest first, at most [`MAX_RECENT_TXS`]; empty when the lookup failed
    pub recent_txs: Vec<RecentTx>,
}

impl WalletSnapshot {
    pub fn new(
        address: AddressQuery,
        tx_count: u64,
        usdc_balance: f64,
        mut recent_txs: Vec<RecentTx>,
    ) -> Self {
        recent_txs.truncate(MAX_RECENT_TXS);
        let usdc_balance = if usdc_balance.is_finite() && usdc_balance > 0.0 {
            usdc_balance
        } else {
            0.0
        };
        Self {
            address,
            tx_count,
            usdc_balance,
            recent_txs,
        }
    }
}

/// Successful response payload of the roast endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastResult {
    pub address: AddressQuery,
    pub tx_count: u64,
    pub usdc_balance: f64,
    pub recent_txs: Vec<RecentTx>,
    pub roast: String,
}

impl RoastResult {
    pub fn new(snapshot: WalletSnapshot, roast: String) -> Self {
        Self {
            address: snapshot.address,
            tx_count: snapshot.tx_count,
            usdc_balance: snapshot.usdc_balance,
            recent_txs: snapshot.recent_txs,
            roast,
        }
    }
}
