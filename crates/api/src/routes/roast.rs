//! Wallet roast route.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::Instrument;
use uuid::Uuid;

use roast_common::error::AppError;
use roast_common::types::{AddressQuery, RoastResult};

use crate::state::AppState;

pub fn router(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/roast", post(roast_wallet))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

/// POST /api/roast — Gather on-chain facts for `address` and roast them.
///
/// The body is read as raw bytes so that every malformed payload, including
/// one over the size limit, answers with the same JSON error.
async fn roast_wallet(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RoastResult>, AppError> {
    let body = body.map_err(|_| AppError::invalid_json())?;
    let payload: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| AppError::invalid_json())?;
    let address = AddressQuery::from_body(&payload)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("roast", %request_id, address = %address);

    let result = state.roaster.roast(address).instrument(span).await?;
    Ok(Json(result))
}
