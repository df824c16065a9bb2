//! Remote data gateway for the on-chain facts behind a roast.
//!
//! Every lookup implements [`WalletSource`]. Whether a failed lookup aborts the
//! request or falls back to a default is decided by the caller, not the source.

pub mod explorer;
pub mod rpc;

use async_trait::async_trait;
use thiserror::Error;

use roast_common::bounded::TimedOut;
use roast_common::types::AddressQuery;

pub use explorer::RecentTxSource;
pub use rpc::{ArcRpc, TxCountSource, UsdcBalanceSource};

/// Failure of a single remote lookup.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

/// A read-only lookup of one fact about a wallet.
#[async_trait]
pub trait WalletSource: Send + Sync {
    type Output: Send;

    /// Fetch the fact for `address`.
    async fn fetch(&self, address: &AddressQuery) -> Result<Self::Output, SourceError>;

    /// Short name used in logs (e.g., "usdc_balance").
    fn name(&self) -> &'static str;
}
