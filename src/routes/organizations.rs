use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// UCSBOrganization Router Module
///
/// CRUD routes for the organization resource. Unlike the other resources the
/// key (`orgCode`) is caller-supplied, and a PUT may change it in place.
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        // GET /ucsborganization/all: list every organization.
        .route("/ucsborganization/all", get(handlers::all_organizations))
        // POST /ucsborganization/post: create from query parameters (ADMIN).
        .route("/ucsborganization/post", post(handlers::post_organization))
        // GET/PUT/DELETE /ucsborganization?orgCode=...
        .route(
            "/ucsborganization",
            get(handlers::get_organization)
                .put(handlers::update_organization)
                .delete(handlers::delete_organization),
        )
}
