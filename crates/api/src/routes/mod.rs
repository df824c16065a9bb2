pub mod health;
pub mod roast;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::panic::panic_response;
use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(roast::router(state.config.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
