use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Articles Router Module
///
/// CRUD routes for the Articles resource. List and get-by-id require the
/// USER role (enforced by the `AuthUser` extractor); post, put, and delete
/// additionally require ADMIN, checked at the top of each handler.
pub fn article_routes() -> Router<AppState> {
    Router::new()
        // GET /articles/all: list every article, store order, no pagination.
        .route("/articles/all", get(handlers::all_articles))
        // POST /articles/post: create from query parameters (ADMIN).
        .route("/articles/post", post(handlers::post_article))
        // GET/PUT/DELETE /articles?id=...: single-record operations keyed
        // by the generated id.
        .route(
            "/articles",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
}
