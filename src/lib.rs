use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (one router per resource, plus public).
pub mod routes;
use auth::AuthUser; // The resolved authenticated caller identity.
use routes::{articles, help_requests, menu_items, organizations, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point
// (main.rs) and the test suite.
pub use config::AppConfig;
pub use repository::{
    ArticleRepo, HelpRequestRepo, InMemoryRepository, MenuItemRepo, OrganizationRepo,
    PostgresRepository,
};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application from the `#[utoipa::path]` handler annotations and the
/// `ToSchema` entity derives. The resulting JSON is served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::all_articles, handlers::get_article, handlers::post_article,
        handlers::update_article, handlers::delete_article,
        handlers::all_help_requests, handlers::get_help_request, handlers::post_help_request,
        handlers::update_help_request, handlers::delete_help_request,
        handlers::all_organizations, handlers::get_organization, handlers::post_organization,
        handlers::update_organization, handlers::delete_organization,
        handlers::all_menu_items, handlers::get_menu_item, handlers::post_menu_item,
        handlers::update_menu_item, handlers::delete_menu_item,
    ),
    components(
        schemas(
            models::Article, models::HelpRequest,
            models::UcsbOrganization, models::UcsbDiningCommonsMenuItem,
        )
    ),
    tags(
        (name = "campus-portal", description = "Campus Portal CRUD API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding every gateway and
/// the loaded configuration, shared across all incoming requests. Each
/// resource gets its own gateway handle; in production all four point at the
/// same `PostgresRepository` behind the pool.
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleRepo,
    pub help_requests: HelpRequestRepo,
    pub organizations: OrganizationRepo,
    pub menu_items: MenuItemRepo,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// Lets the AuthUser extractor pull the AppConfig (JWT secret, Env check)
// out of the shared state without coupling it to the full AppState.
impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for every resource route.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since
/// `AuthUser` implements `FromRequestParts`, if authentication fails the
/// extractor immediately rejects the request with 403, preventing execution
/// of the handler. Handlers still take `AuthUser` themselves for the
/// admin-role checks; this layer is the first line of defense.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Resource routes, all behind the authentication layer. Role
    // segregation happens inside the handlers because read and write routes
    // share paths.
    let resource_router = Router::new()
        .merge(articles::article_routes())
        .merge(help_requests::help_request_routes())
        .merge(organizations::organization_routes())
        .merge(menu_items::menu_item_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // 3. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        .merge(resource_router)
        // Apply the unified state to all routes.
        .with_state(state);

    // 4. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 4a. Request ID generation: a unique UUID per request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 4b. Request tracing: wraps the request/response lifecycle
                // in a span correlated by the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 4c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 5. CORS layer (applied last).
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation: it extracts the
/// `x-request-id` header (if present) and includes it in the structured
/// logging metadata alongside the HTTP method and URI, so every log line for
/// a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
