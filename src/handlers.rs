use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{Article, HelpRequest, UcsbDiningCommonsMenuItem, UcsbOrganization},
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Value, json};

// --- Parameter Structs ---
//
// Create endpoints take entity fields as individual query parameters (not a
// structured body), so each entity gets a params struct bound by Axum's
// Query extractor. A malformed date-time or boolean fails deserialization
// and rejects the request with 400 before any handler logic runs.

/// Accepted query parameters for POST /articles/post.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleParams {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    /// Date string, expected (but not enforced) to be `YYYY-MM-DD`.
    pub date_added: String,
}

/// Accepted query parameters for POST /helprequest/post.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CreateHelpRequestParams {
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    /// ISO-8601 date-time, e.g. `2024-10-22T18:11:56`.
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

/// Accepted query parameters for POST /ucsborganization/post.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationParams {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

/// Accepted query parameters for POST /ucsbdiningcommonsmenuitem/post.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemParams {
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}

/// Numeric key parameter for get/update/delete on generated-id entities.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct IdParam {
    pub id: i64,
}

/// Key parameter for get/update/delete on organizations.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrgCodeParam {
    pub org_code: String,
}

// Confirmation body for delete endpoints, a `{"message": "..."}` shape the
// frontend displays verbatim.
fn deleted_message(kind: &str, key: impl std::fmt::Display) -> Json<Value> {
    Json(json!({ "message": format!("{kind} with id {key} deleted") }))
}

// --- Article Handlers ---

/// [USER Route] Lists every stored article, in store order. No pagination.
#[utoipa::path(
    get,
    path = "/articles/all",
    responses((status = 200, description = "All articles", body = [Article]))
)]
pub async fn all_articles(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.articles.find_all().await?;
    Ok(Json(articles))
}

/// [USER Route] Retrieves a single article by id.
#[utoipa::path(
    get,
    path = "/articles",
    params(IdParam),
    responses(
        (status = 200, description = "Found", body = Article),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_article(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article", id))?;
    Ok(Json(article))
}

/// [ADMIN Route] Creates a new article from the supplied parameters,
/// verbatim, and returns the persisted record.
#[utoipa::path(
    post,
    path = "/articles/post",
    params(CreateArticleParams),
    responses((status = 200, description = "Created", body = Article))
)]
pub async fn post_article(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CreateArticleParams>,
) -> Result<Json<Article>, ApiError> {
    user.require_admin()?;

    let article = Article {
        id: 0,
        title: params.title,
        url: params.url,
        explanation: params.explanation,
        email: params.email,
        date_added: params.date_added,
    };

    let saved = state.articles.create(article).await?;
    Ok(Json(saved))
}

/// [ADMIN Route] Full-record replacement of an existing article. The stored
/// id is retained; every other field is overwritten from the body.
#[utoipa::path(
    put,
    path = "/articles",
    params(IdParam),
    request_body = Article,
    responses(
        (status = 200, description = "Updated", body = Article),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_article(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
    Json(incoming): Json<Article>,
) -> Result<Json<Article>, ApiError> {
    user.require_admin()?;

    state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article", id))?;

    // A delete can race between the lookup and this mutation; treat that as
    // not-found too.
    let updated = state
        .articles
        .update(id, incoming)
        .await?
        .ok_or_else(|| ApiError::not_found("Article", id))?;
    Ok(Json(updated))
}

/// [ADMIN Route] Deletes an article and returns a confirmation message.
#[utoipa::path(
    delete,
    path = "/articles",
    params(IdParam),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_article(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;

    state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article", id))?;

    state.articles.delete(id).await?;
    Ok(deleted_message("Article", id))
}

// --- HelpRequest Handlers ---

/// [USER Route] Lists every stored help request, in store order.
#[utoipa::path(
    get,
    path = "/helprequest/all",
    responses((status = 200, description = "All help requests", body = [HelpRequest]))
)]
pub async fn all_help_requests(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<HelpRequest>>, ApiError> {
    let requests = state.help_requests.find_all().await?;
    Ok(Json(requests))
}

/// [USER Route] Retrieves a single help request by id.
#[utoipa::path(
    get,
    path = "/helprequest",
    params(IdParam),
    responses(
        (status = 200, description = "Found", body = HelpRequest),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_help_request(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<HelpRequest>, ApiError> {
    let request = state
        .help_requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("HelpRequest", id))?;
    Ok(Json(request))
}

/// [ADMIN Route] Creates a new help request. The request time is bound as an
/// ISO-8601 date-time; a malformed value rejects the request with 400.
#[utoipa::path(
    post,
    path = "/helprequest/post",
    params(CreateHelpRequestParams),
    responses((status = 200, description = "Created", body = HelpRequest))
)]
pub async fn post_help_request(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CreateHelpRequestParams>,
) -> Result<Json<HelpRequest>, ApiError> {
    user.require_admin()?;

    tracing::info!(request_time = %params.request_time, "creating help request");

    let request = HelpRequest {
        id: 0,
        requester_email: params.requester_email,
        team_id: params.team_id,
        table_or_breakout_room: params.table_or_breakout_room,
        request_time: params.request_time,
        explanation: params.explanation,
        solved: params.solved,
    };

    let saved = state.help_requests.create(request).await?;
    Ok(Json(saved))
}

/// [ADMIN Route] Full-record replacement of an existing help request.
#[utoipa::path(
    put,
    path = "/helprequest",
    params(IdParam),
    request_body = HelpRequest,
    responses(
        (status = 200, description = "Updated", body = HelpRequest),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_help_request(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
    Json(incoming): Json<HelpRequest>,
) -> Result<Json<HelpRequest>, ApiError> {
    user.require_admin()?;

    state
        .help_requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("HelpRequest", id))?;

    let updated = state
        .help_requests
        .update(id, incoming)
        .await?
        .ok_or_else(|| ApiError::not_found("HelpRequest", id))?;
    Ok(Json(updated))
}

/// [ADMIN Route] Deletes a help request and returns a confirmation message.
#[utoipa::path(
    delete,
    path = "/helprequest",
    params(IdParam),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_help_request(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;

    state
        .help_requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("HelpRequest", id))?;

    state.help_requests.delete(id).await?;
    Ok(deleted_message("HelpRequest", id))
}

// --- UCSBOrganization Handlers ---

/// [USER Route] Lists every stored organization, in store order.
#[utoipa::path(
    get,
    path = "/ucsborganization/all",
    responses((status = 200, description = "All organizations", body = [UcsbOrganization]))
)]
pub async fn all_organizations(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UcsbOrganization>>, ApiError> {
    let orgs = state.organizations.find_all().await?;
    Ok(Json(orgs))
}

/// [USER Route] Retrieves a single organization by its caller-supplied code.
#[utoipa::path(
    get,
    path = "/ucsborganization",
    params(OrgCodeParam),
    responses(
        (status = 200, description = "Found", body = UcsbOrganization),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_organization(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(OrgCodeParam { org_code }): Query<OrgCodeParam>,
) -> Result<Json<UcsbOrganization>, ApiError> {
    let org = state
        .organizations
        .find_by_code(&org_code)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBOrganization", &org_code))?;
    Ok(Json(org))
}

/// [ADMIN Route] Creates a new organization. The key (`orgCode`) is supplied
/// by the caller and must be unique; the store's primary key enforces that.
#[utoipa::path(
    post,
    path = "/ucsborganization/post",
    params(CreateOrganizationParams),
    responses((status = 200, description = "Created", body = UcsbOrganization))
)]
pub async fn post_organization(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CreateOrganizationParams>,
) -> Result<Json<UcsbOrganization>, ApiError> {
    user.require_admin()?;

    let org = UcsbOrganization {
        org_code: params.org_code,
        org_translation_short: params.org_translation_short,
        org_translation: params.org_translation,
        inactive: params.inactive,
    };

    let saved = state.organizations.create(org).await?;
    Ok(Json(saved))
}

/// [ADMIN Route] Full-record replacement of an existing organization. The
/// incoming body's `orgCode` replaces the key itself, so an update may move
/// the record to a new key in place.
#[utoipa::path(
    put,
    path = "/ucsborganization",
    params(OrgCodeParam),
    request_body = UcsbOrganization,
    responses(
        (status = 200, description = "Updated", body = UcsbOrganization),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_organization(
    user: AuthUser,
    State(state): State<AppState>,
    Query(OrgCodeParam { org_code }): Query<OrgCodeParam>,
    Json(incoming): Json<UcsbOrganization>,
) -> Result<Json<UcsbOrganization>, ApiError> {
    user.require_admin()?;

    state
        .organizations
        .find_by_code(&org_code)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBOrganization", &org_code))?;

    let updated = state
        .organizations
        .update(&org_code, incoming)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBOrganization", &org_code))?;
    Ok(Json(updated))
}

/// [ADMIN Route] Deletes an organization and returns a confirmation message.
#[utoipa::path(
    delete,
    path = "/ucsborganization",
    params(OrgCodeParam),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_organization(
    user: AuthUser,
    State(state): State<AppState>,
    Query(OrgCodeParam { org_code }): Query<OrgCodeParam>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;

    state
        .organizations
        .find_by_code(&org_code)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBOrganization", &org_code))?;

    state.organizations.delete(&org_code).await?;
    Ok(deleted_message("UCSBOrganization", org_code))
}

// --- UCSBDiningCommonsMenuItem Handlers ---

/// [USER Route] Lists every stored menu item, in store order.
#[utoipa::path(
    get,
    path = "/ucsbdiningcommonsmenuitem/all",
    responses((status = 200, description = "All menu items", body = [UcsbDiningCommonsMenuItem]))
)]
pub async fn all_menu_items(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UcsbDiningCommonsMenuItem>>, ApiError> {
    let items = state.menu_items.find_all().await?;
    Ok(Json(items))
}

/// [USER Route] Retrieves a single menu item by id.
#[utoipa::path(
    get,
    path = "/ucsbdiningcommonsmenuitem",
    params(IdParam),
    responses(
        (status = 200, description = "Found", body = UcsbDiningCommonsMenuItem),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_menu_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<UcsbDiningCommonsMenuItem>, ApiError> {
    let item = state
        .menu_items
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBDiningCommonsMenuItem", id))?;
    Ok(Json(item))
}

/// [ADMIN Route] Creates a new menu item from the supplied parameters.
#[utoipa::path(
    post,
    path = "/ucsbdiningcommonsmenuitem/post",
    params(CreateMenuItemParams),
    responses((status = 200, description = "Created", body = UcsbDiningCommonsMenuItem))
)]
pub async fn post_menu_item(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CreateMenuItemParams>,
) -> Result<Json<UcsbDiningCommonsMenuItem>, ApiError> {
    user.require_admin()?;

    let item = UcsbDiningCommonsMenuItem {
        id: 0,
        dining_commons_code: params.dining_commons_code,
        name: params.name,
        station: params.station,
    };

    let saved = state.menu_items.create(item).await?;
    Ok(Json(saved))
}

/// [ADMIN Route] Full-record replacement of an existing menu item.
#[utoipa::path(
    put,
    path = "/ucsbdiningcommonsmenuitem",
    params(IdParam),
    request_body = UcsbDiningCommonsMenuItem,
    responses(
        (status = 200, description = "Updated", body = UcsbDiningCommonsMenuItem),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_menu_item(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
    Json(incoming): Json<UcsbDiningCommonsMenuItem>,
) -> Result<Json<UcsbDiningCommonsMenuItem>, ApiError> {
    user.require_admin()?;

    state
        .menu_items
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBDiningCommonsMenuItem", id))?;

    let updated = state
        .menu_items
        .update(id, incoming)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBDiningCommonsMenuItem", id))?;
    Ok(Json(updated))
}

/// [ADMIN Route] Deletes a menu item and returns a confirmation message.
#[utoipa::path(
    delete,
    path = "/ucsbdiningcommonsmenuitem",
    params(IdParam),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_menu_item(
    user: AuthUser,
    State(state): State<AppState>,
    Query(IdParam { id }): Query<IdParam>,
) -> Result<Json<Value>, ApiError> {
    user.require_admin()?;

    state
        .menu_items
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("UCSBDiningCommonsMenuItem", id))?;

    state.menu_items.delete(id).await?;
    Ok(deleted_message("UCSBDiningCommonsMenuItem", id))
}
