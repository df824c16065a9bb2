use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use roast_common::bounded::bounded;
use roast_common::types::{AddressQuery, MAX_RECENT_TXS, RecentTx};

use crate::{SourceError, WalletSource};

/// Most recent transactions of an address, from an etherscan-compatible
/// block explorer (`module=account&action=txlist`).
pub struct RecentTxSource {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl RecentTxSource {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl WalletSource for RecentTxSource {
    type Output = Vec<RecentTx>;

    async fn fetch(&self, address: &AddressQuery) -> Result<Vec<RecentTx>, SourceError> {
        let page_size = MAX_RECENT_TXS.to_string();

        bounded(self.timeout, async {
            let response = self
                .client
                .get(&self.api_url)
                .query(&[
                    ("module", "account"),
                    ("action", "txlist"),
                    ("address", address.as_str()),
                    ("sort", "desc"),
                    ("page", "1"),
                    ("offset", page_size.as_str()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(SourceError::Status(response.status().as_u16()));
            }

            let body: Value = response.json().await?;
            let txs = parse_txlist(&body)?;
            tracing::debug!(address = %address, count = txs.len(), "Fetched recent transactions");
            Ok(txs)
        })
        .await
    }

    fn name(&self) -> &'static str {
        "recent_txs"
    }
}

/// Extract up to [`MAX_RECENT_TXS`] entries from a `txlist` response body.
///
/// Explorers report "no transactions" in several ways; anything other than a
/// `result` array is treated as malformed. Individual entries never fail.
pub fn parse_txlist(body: &Value) -> Result<Vec<RecentTx>, SourceError> {
    let entries = body
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Malformed("txlist result is not a list".to_string()))?;

    Ok(entries
        .iter()
        .take(MAX_RECENT_TXS)
        .map(RecentTx::from_explorer)
        .collect())
}
