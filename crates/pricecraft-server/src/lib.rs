//! HTTP surface for the PriceCraft analysis backend.
//!
//! Three endpoints define the boundary toward front-ends: `POST /chat`
//! routes a turn through a per-session conversation, `POST /parse` returns
//! extracted file content, and `POST /upload` accepts multipart uploads.
//! Failures use the `{error, success: false}` envelope.

mod handlers;
mod state;

pub use state::AppState;

use axum::Router;
use axum::routing::post;

/// Build the router for the PriceCraft API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/parse", post(handlers::parse))
        .route("/upload", post(handlers::upload))
        .with_state(state)
}
