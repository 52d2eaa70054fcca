use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// UCSBDiningCommonsMenuItem Router Module
///
/// CRUD routes for dining commons menu items. Reads require USER, writes
/// require ADMIN (checked per handler).
pub fn menu_item_routes() -> Router<AppState> {
    Router::new()
        // GET /ucsbdiningcommonsmenuitem/all: list every menu item.
        .route(
            "/ucsbdiningcommonsmenuitem/all",
            get(handlers::all_menu_items),
        )
        // POST /ucsbdiningcommonsmenuitem/post: create (ADMIN).
        .route(
            "/ucsbdiningcommonsmenuitem/post",
            post(handlers::post_menu_item),
        )
        // GET/PUT/DELETE /ucsbdiningcommonsmenuitem?id=...
        .route(
            "/ucsbdiningcommonsmenuitem",
            get(handlers::get_menu_item)
                .put(handlers::update_menu_item)
                .delete(handlers::delete_menu_item),
        )
}
