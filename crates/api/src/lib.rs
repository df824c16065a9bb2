//! Arc wallet roast HTTP API.
//!
//! Endpoints:
//! - GET  /health — liveness check
//! - POST /api/roast — roast the wallet named in `{ "address": "0x..." }`

pub mod middleware;
pub mod routes;
pub mod state;
