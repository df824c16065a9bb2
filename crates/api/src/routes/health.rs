//! Liveness endpoint. Reports the network being roasted and whether the
//! generation client has credentials; never calls an upstream.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use roast_engine::prompt::{CHAIN_ID, NETWORK_NAME};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "arc-roast-api",
        "version": env!("CARGO_PKG_VERSION"),
        "network": NETWORK_NAME,
        "chain_id": CHAIN_ID,
        "model": state.config.anthropic_model,
        "api_key_configured": state.config.anthropic_api_key.is_some(),
    }))
}
