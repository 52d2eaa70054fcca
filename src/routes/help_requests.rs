use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// HelpRequest Router Module
///
/// CRUD routes for the HelpRequest resource. Reads require USER, writes
/// require ADMIN (checked per handler).
pub fn help_request_routes() -> Router<AppState> {
    Router::new()
        // GET /helprequest/all: list every help request.
        .route("/helprequest/all", get(handlers::all_help_requests))
        // POST /helprequest/post: create from query parameters (ADMIN).
        // The requestTime parameter must parse as ISO-8601 or the request
        // is rejected with 400.
        .route("/helprequest/post", post(handlers::post_help_request))
        // GET/PUT/DELETE /helprequest?id=...
        .route(
            "/helprequest",
            get(handlers::get_help_request)
                .put(handlers::update_help_request)
                .delete(handlers::delete_help_request),
        )
}
