use std::net::SocketAddr;
use std::time::Duration;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Arc Testnet JSON-RPC endpoint
    pub rpc_url: String,

    /// USDC token contract queried with `balanceOf`
    pub usdc_contract: String,

    /// Block explorer REST API (etherscan-compatible `txlist`)
    pub explorer_api_url: String,

    /// Anthropic Messages API endpoint
    pub anthropic_api_url: String,

    /// Anthropic API key; the `x-api-key` header is omitted when unset
    pub anthropic_api_key: Option<String>,

    /// Model used for generation
    pub anthropic_model: String,

    /// Value of the `anthropic-version` header
    pub anthropic_version: String,

    /// Output bound for a single generation
    pub max_tokens: u32,

    /// Timeout for each JSON-RPC call (default: 12000)
    pub rpc_timeout_ms: u64,

    /// Timeout for the explorer lookup (default: 8000)
    pub explorer_timeout_ms: u64,

    /// Timeout for the generation call (default: 30000)
    pub generation_timeout_ms: u64,

    /// Largest accepted request body in bytes (default: 16384)
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000")
                .parse()
                .map_err(|_| anyhow::anyhow!("BIND_ADDR must be a valid socket address"))?,
            rpc_url: env_or("ARC_RPC_URL", "https://rpc.testnet.arc.network"),
            usdc_contract: env_or(
                "USDC_CONTRACT_ADDRESS",
                "0x3600000000000000000000000000000000000000",
            ),
            explorer_api_url: env_or("EXPLORER_API_URL", "https://testnet.arcscan.app/api"),
            anthropic_api_url: env_or(
                "ANTHROPIC_API_URL",
                "https://api.anthropic.com/v1/messages",
            ),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            anthropic_model: env_or("ANTHROPIC_MODEL", "claude-sonnet-4-5-20250929"),
            anthropic_version: env_or("ANTHROPIC_VERSION", "2023-06-01"),
            max_tokens: env_or("ROAST_MAX_TOKENS", "1024")
                .parse()
                .map_err(|_| anyhow::anyhow!("ROAST_MAX_TOKENS must be a valid u32"))?,
            rpc_timeout_ms: env_or("RPC_TIMEOUT_MS", "12000")
                .parse()
                .map_err(|_| anyhow::anyhow!("RPC_TIMEOUT_MS must be a valid u64"))?,
            explorer_timeout_ms: env_or("EXPLORER_TIMEOUT_MS", "8000")
                .parse()
                .map_err(|_| anyhow::anyhow!("EXPLORER_TIMEOUT_MS must be a valid u64"))?,
            generation_timeout_ms: env_or("GENERATION_TIMEOUT_MS", "30000")
                .parse()
                .map_err(|_| anyhow::anyhow!("GENERATION_TIMEOUT_MS must be a valid u64"))?,
            max_body_bytes: env_or("MAX_BODY_BYTES", "16384")
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a valid usize"))?,
        })
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn explorer_timeout(&self) -> Duration {
        Duration::from_millis(self.explorer_timeout_ms)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
