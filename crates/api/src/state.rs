//! Shared application state for the Axum API server.

use std::sync::Arc;

use roast_chain::{ArcRpc, RecentTxSource, TxCountSource, UsdcBalanceSource};
use roast_common::config::AppConfig;
use roast_engine::Roaster;
use roast_llm::AnthropicClient;

/// Application state shared across all route handlers via Axum `State`.
///
/// Everything in here is immutable; requests share clients, never data.
#[derive(Clone)]
pub struct AppState {
    pub roaster: Roaster,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(roaster: Roaster, config: AppConfig) -> Self {
        Self { roaster, config }
    }

    /// Wire the RPC, explorer and generation clients described by `config`.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::new();
        let rpc = Arc::new(ArcRpc::new(&config.rpc_url, config.rpc_timeout())?);

        let roaster = Roaster::new(
            Arc::new(TxCountSource::new(rpc.clone())),
            Arc::new(UsdcBalanceSource::new(rpc, &config.usdc_contract)?),
            Arc::new(RecentTxSource::new(
                http.clone(),
                config.explorer_api_url.clone(),
                config.explorer_timeout(),
            )),
            Arc::new(AnthropicClient::new(
                http,
                config.anthropic_api_url.clone(),
                config.anthropic_api_key.clone(),
                config.anthropic_version.clone(),
                config.anthropic_model.clone(),
                config.max_tokens,
                config.generation_timeout(),
            )),
        );

        Ok(Self::new(roaster, config))
    }
}
