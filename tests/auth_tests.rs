use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use campus_portal::{
    AppState, create_router,
    auth::{Claims, Role},
    config::{AppConfig, Env},
    repository::{
        ArticleRepo, HelpRequestRepo, InMemoryRepository, MenuItemRepo, OrganizationRepo,
    },
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use std::sync::Arc;
use tower::ServiceExt;

// --- TEST UTILITIES ---

fn app_with_config(config: AppConfig) -> Router {
    let repo = Arc::new(InMemoryRepository::new());
    let state = AppState {
        articles: repo.clone() as ArticleRepo,
        help_requests: repo.clone() as HelpRequestRepo,
        organizations: repo.clone() as OrganizationRepo,
        menu_items: repo as MenuItemRepo,
        config,
    };
    create_router(state)
}

// Mints a token the way the external auth provider would.
fn mint_token(role: Role, secret: &str, expires_in_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user-123".to_string(),
        role,
        exp: (now + expires_in_secs) as usize,
        iat: now as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn bearer_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn bearer_post(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

// --- JWT VALIDATION ---

#[tokio::test]
async fn valid_user_token_can_read() {
    let config = AppConfig::default();
    let token = mint_token(Role::User, &config.jwt_secret, 3600);
    let app = app_with_config(config);

    let response = app
        .oneshot(bearer_get("/articles/all", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn valid_admin_token_can_post() {
    let config = AppConfig::default();
    let token = mint_token(Role::Admin, &config.jwt_secret, 3600);
    let app = app_with_config(config);

    let uri = "/ucsbdiningcommonsmenuitem/post?diningCommonsCode=ortega&name=Pasta&station=Entrees";
    let response = app.oneshot(bearer_post(uri, &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_token_cannot_post() {
    let config = AppConfig::default();
    let token = mint_token(Role::User, &config.jwt_secret, 3600);
    let app = app_with_config(config);

    let uri = "/ucsbdiningcommonsmenuitem/post?diningCommonsCode=ortega&name=Pasta&station=Entrees";
    let response = app.oneshot(bearer_post(uri, &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let config = AppConfig::default();
    // Expired well past any validation leeway.
    let token = mint_token(Role::Admin, &config.jwt_secret, -3600);
    let app = app_with_config(config);

    let response = app
        .oneshot(bearer_get("/articles/all", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let config = AppConfig::default();
    let token = mint_token(Role::Admin, "some-other-secret", 3600);
    let app = app_with_config(config);

    let response = app
        .oneshot(bearer_get("/articles/all", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_bearer_prefix_is_rejected() {
    let config = AppConfig::default();
    let token = mint_token(Role::User, &config.jwt_secret, 3600);
    let app = app_with_config(config);

    let request = Request::builder()
        .method("GET")
        .uri("/articles/all")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// --- DEV BYPASS SCOPING ---

#[tokio::test]
async fn bypass_headers_work_in_local() {
    let app = app_with_config(AppConfig::default());

    let request = Request::builder()
        .method("GET")
        .uri("/articles/all")
        .header("x-user-role", "admin")
        .header("x-user-id", "local-admin")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bypass_headers_are_inert_in_production() {
    let config = AppConfig {
        env: Env::Production,
        ..AppConfig::default()
    };
    let app = app_with_config(config);

    let request = Request::builder()
        .method("GET")
        .uri("/articles/all")
        .header("x-user-role", "admin")
        .header("x-user-id", "local-admin")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_bypass_role_falls_through_to_jwt() {
    let app = app_with_config(AppConfig::default());

    // An unrecognized role header cannot authenticate by itself.
    let request = Request::builder()
        .method("GET")
        .uri("/articles/all")
        .header("x-user-role", "superuser")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
