//! Arc wallet roast API server binary entrypoint.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use roast_common::config::AppConfig;

use roast_api::routes::create_router;
use roast_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "roast_api=debug,roast_engine=debug,roast_chain=debug,roast_llm=debug,tower_http=debug",
        )
    });
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting Arc roast API server...");

    // Load configuration
    let config = AppConfig::from_env()?;
    if config.anthropic_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; generation requests will be unauthenticated");
    }

    let addr = config.bind_addr;
    tracing::info!(
        rpc_url = %config.rpc_url,
        explorer = %config.explorer_api_url,
        model = %config.anthropic_model,
        "Upstream endpoints configured"
    );

    // Build application state
    let state = AppState::from_config(config)?;

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("Arc roast API server stopped.");
    Ok(())
}
