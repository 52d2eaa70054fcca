use axum::{Json, extract::Query, extract::State};
use campus_portal::{
    AppState,
    auth::{AuthUser, Role},
    config::AppConfig,
    error::ApiError,
    handlers::{
        self, CreateArticleParams, CreateHelpRequestParams, CreateMenuItemParams,
        CreateOrganizationParams, IdParam, OrgCodeParam,
    },
    models::{Article, HelpRequest, UcsbDiningCommonsMenuItem, UcsbOrganization},
    repository::{
        ArticleRepo, HelpRequestRepo, InMemoryRepository, MenuItemRepo, OrganizationRepo,
    },
};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::test;

// --- TEST UTILITIES ---

// Creates an AppState over a fresh in-memory store. All four gateways share
// the same repository instance, mirroring production.
fn test_state() -> AppState {
    let repo = Arc::new(InMemoryRepository::new());
    AppState {
        articles: repo.clone() as ArticleRepo,
        help_requests: repo.clone() as HelpRequestRepo,
        organizations: repo.clone() as OrganizationRepo,
        menu_items: repo as MenuItemRepo,
        config: AppConfig::default(),
    }
}

fn admin_user() -> AuthUser {
    AuthUser {
        id: "admin-1".to_string(),
        role: Role::Admin,
    }
}

fn regular_user() -> AuthUser {
    AuthUser {
        id: "user-1".to_string(),
        role: Role::User,
    }
}

fn article_params() -> CreateArticleParams {
    CreateArticleParams {
        title: "Using testing-playground with React Testing Library".to_string(),
        url: "https://dev.to/katieraby/using-testing-playground".to_string(),
        explanation: "Helpful when we get to front end development".to_string(),
        email: "phtcon@ucsb.edu".to_string(),
        date_added: "2022-04-19".to_string(),
    }
}

fn request_time() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-10-22T18:11:56", "%Y-%m-%dT%H:%M:%S").unwrap()
}

// --- ARTICLE HANDLER TESTS ---

#[test]
async fn post_article_requires_admin() {
    let state = test_state();

    let result =
        handlers::post_article(regular_user(), State(state.clone()), Query(article_params())).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));

    // The short-circuit must happen before any gateway call.
    let Json(articles) = handlers::all_articles(regular_user(), State(state))
        .await
        .unwrap();
    assert!(articles.is_empty());
}

#[test]
async fn admin_can_post_and_list_articles() {
    let state = test_state();

    let Json(saved) =
        handlers::post_article(admin_user(), State(state.clone()), Query(article_params()))
            .await
            .unwrap();

    // Fields are copied verbatim, id is store-assigned.
    assert_eq!(saved.id, 1);
    assert_eq!(saved.title, article_params().title);
    assert_eq!(saved.date_added, "2022-04-19");

    let Json(articles) = handlers::all_articles(regular_user(), State(state))
        .await
        .unwrap();
    assert_eq!(articles, vec![saved]);
}

#[test]
async fn articles_list_in_store_order() {
    let state = test_state();

    let mut first = article_params();
    first.title = "first".to_string();
    let mut second = article_params();
    second.title = "second".to_string();

    handlers::post_article(admin_user(), State(state.clone()), Query(first))
        .await
        .unwrap();
    handlers::post_article(admin_user(), State(state.clone()), Query(second))
        .await
        .unwrap();

    let Json(articles) = handlers::all_articles(regular_user(), State(state))
        .await
        .unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "first");
    assert_eq!(articles[1].title, "second");
}

#[test]
async fn get_article_not_found_carries_kind_and_key() {
    let state = test_state();

    let result = handlers::get_article(regular_user(), State(state), Query(IdParam { id: 7 })).await;

    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::EntityNotFound { .. }));
    assert_eq!(err.to_string(), "Article with id 7 not found");
}

#[test]
async fn update_article_replaces_every_field() {
    let state = test_state();

    handlers::post_article(admin_user(), State(state.clone()), Query(article_params()))
        .await
        .unwrap();

    let incoming = Article {
        id: 0, // ignored; the stored id wins
        title: "new title".to_string(),
        url: "https://example.org/new".to_string(),
        explanation: "rewritten".to_string(),
        email: "new@ucsb.edu".to_string(),
        date_added: "2023-01-01".to_string(),
    };

    let Json(updated) = handlers::update_article(
        admin_user(),
        State(state.clone()),
        Query(IdParam { id: 1 }),
        Json(incoming.clone()),
    )
    .await
    .unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.title, incoming.title);
    assert_eq!(updated.email, incoming.email);

    let Json(fetched) = handlers::get_article(
        regular_user(),
        State(state),
        Query(IdParam { id: 1 }),
    )
    .await
    .unwrap();
    assert_eq!(fetched, updated);
}

// --- HELP REQUEST HANDLER TESTS ---

#[test]
async fn admin_can_post_help_request() {
    let state = test_state();

    let params = CreateHelpRequestParams {
        requester_email: "admin@example.com".to_string(),
        team_id: "adminTeam".to_string(),
        table_or_breakout_room: "Breakout Room 1".to_string(),
        request_time: request_time(),
        explanation: "Urgent help needed".to_string(),
        solved: false,
    };

    let Json(saved) = handlers::post_help_request(admin_user(), State(state.clone()), Query(params))
        .await
        .unwrap();

    assert_eq!(saved.id, 1);
    assert_eq!(saved.requester_email, "admin@example.com");
    assert_eq!(saved.table_or_breakout_room, "Breakout Room 1");
    assert_eq!(saved.request_time, request_time());
    assert!(!saved.solved);
}

#[test]
async fn update_missing_help_request_persists_nothing() {
    let state = test_state();

    let incoming = HelpRequest {
        id: 0,
        requester_email: "x@example.com".to_string(),
        team_id: "t1".to_string(),
        table_or_breakout_room: "Table 5".to_string(),
        request_time: request_time(),
        explanation: "ghost".to_string(),
        solved: true,
    };

    let result = handlers::update_help_request(
        admin_user(),
        State(state.clone()),
        Query(IdParam { id: 42 }),
        Json(incoming),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "HelpRequest with id 42 not found");

    let Json(requests) = handlers::all_help_requests(regular_user(), State(state))
        .await
        .unwrap();
    assert!(requests.is_empty());
}

#[test]
async fn delete_help_request_requires_admin() {
    let state = test_state();

    let result =
        handlers::delete_help_request(regular_user(), State(state), Query(IdParam { id: 1 })).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

// --- ORGANIZATION HANDLER TESTS ---

fn engr_params() -> CreateOrganizationParams {
    CreateOrganizationParams {
        org_code: "ENGR".to_string(),
        org_translation_short: "Engineering".to_string(),
        org_translation: "College of Engineering".to_string(),
        inactive: false,
    }
}

#[test]
async fn organization_update_may_change_key_in_place() {
    let state = test_state();

    handlers::post_organization(admin_user(), State(state.clone()), Query(engr_params()))
        .await
        .unwrap();

    let incoming = UcsbOrganization {
        org_code: "ENG".to_string(),
        org_translation_short: "Eng".to_string(),
        org_translation: "Engineering College".to_string(),
        inactive: true,
    };

    let Json(updated) = handlers::update_organization(
        admin_user(),
        State(state.clone()),
        Query(OrgCodeParam {
            org_code: "ENGR".to_string(),
        }),
        Json(incoming.clone()),
    )
    .await
    .unwrap();
    assert_eq!(updated, incoming);

    // The old key is gone, the new one resolves.
    let old = handlers::get_organization(
        regular_user(),
        State(state.clone()),
        Query(OrgCodeParam {
            org_code: "ENGR".to_string(),
        }),
    )
    .await;
    assert_eq!(
        old.unwrap_err().to_string(),
        "UCSBOrganization with id ENGR not found"
    );

    let Json(fetched) = handlers::get_organization(
        regular_user(),
        State(state),
        Query(OrgCodeParam {
            org_code: "ENG".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(fetched, incoming);
}

#[test]
async fn reposting_an_org_code_replaces_the_record() {
    let state = test_state();

    handlers::post_organization(admin_user(), State(state.clone()), Query(engr_params()))
        .await
        .unwrap();

    // Same key again with different fields: save semantics, the existing
    // record is replaced rather than duplicated.
    let Json(saved) = handlers::post_organization(
        admin_user(),
        State(state.clone()),
        Query(CreateOrganizationParams {
            org_code: "ENGR".to_string(),
            org_translation_short: "Engr".to_string(),
            org_translation: "College of Engineering (revised)".to_string(),
            inactive: true,
        }),
    )
    .await
    .unwrap();
    assert_eq!(saved.org_translation_short, "Engr");
    assert!(saved.inactive);

    let Json(all) = handlers::all_organizations(regular_user(), State(state))
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], saved);
}

#[test]
async fn delete_organization_returns_confirmation_message() {
    let state = test_state();

    handlers::post_organization(admin_user(), State(state.clone()), Query(engr_params()))
        .await
        .unwrap();

    let Json(body) = handlers::delete_organization(
        admin_user(),
        State(state.clone()),
        Query(OrgCodeParam {
            org_code: "ENGR".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(body["message"], "UCSBOrganization with id ENGR deleted");

    let Json(orgs) = handlers::all_organizations(regular_user(), State(state))
        .await
        .unwrap();
    assert!(orgs.is_empty());
}

#[test]
async fn delete_missing_organization_leaves_store_unchanged() {
    let state = test_state();

    handlers::post_organization(admin_user(), State(state.clone()), Query(engr_params()))
        .await
        .unwrap();

    let result = handlers::delete_organization(
        admin_user(),
        State(state.clone()),
        Query(OrgCodeParam {
            org_code: "ZPR".to_string(),
        }),
    )
    .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "UCSBOrganization with id ZPR not found"
    );

    let Json(orgs) = handlers::all_organizations(regular_user(), State(state))
        .await
        .unwrap();
    assert_eq!(orgs.len(), 1);
}

// --- MENU ITEM HANDLER TESTS ---

#[test]
async fn menu_item_lifecycle() {
    let state = test_state();

    let params = CreateMenuItemParams {
        dining_commons_code: "ortega".to_string(),
        name: "Baked Pesto Pasta with Chicken".to_string(),
        station: "Entree Specials".to_string(),
    };

    let Json(saved) = handlers::post_menu_item(admin_user(), State(state.clone()), Query(params))
        .await
        .unwrap();
    assert_eq!(saved.id, 1);

    let incoming = UcsbDiningCommonsMenuItem {
        id: 0,
        dining_commons_code: "portola".to_string(),
        name: "Tofu Scramble".to_string(),
        station: "Greens & Grains".to_string(),
    };
    let Json(updated) = handlers::update_menu_item(
        admin_user(),
        State(state.clone()),
        Query(IdParam { id: 1 }),
        Json(incoming),
    )
    .await
    .unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.dining_commons_code, "portola");

    let Json(body) = handlers::delete_menu_item(
        admin_user(),
        State(state.clone()),
        Query(IdParam { id: 1 }),
    )
    .await
    .unwrap();
    assert_eq!(
        body["message"],
        "UCSBDiningCommonsMenuItem with id 1 deleted"
    );

    let result =
        handlers::get_menu_item(regular_user(), State(state), Query(IdParam { id: 1 })).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "UCSBDiningCommonsMenuItem with id 1 not found"
    );
}
