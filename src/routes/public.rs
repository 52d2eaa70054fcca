use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// The only unauthenticated endpoint. Every data route requires at least the
/// USER role, so nothing else belongs here.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is responsive.
        .route("/health", get(|| async { "ok" }))
}
