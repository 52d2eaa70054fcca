use crate::error::ApiError;
use crate::models::{Article, HelpRequest, UcsbDiningCommonsMenuItem, UcsbOrganization};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
};
use std::sync::Arc;

// --- Gateway Traits ---
//
// One small typed data-access interface per entity, each exposing
// find-all / find-by-key / create / update / delete against the backing
// store. The four entities are fully independent, so the duplication across
// traits is deliberate: no shared base trait, no cross-entity workflow.
//
// **Send + Sync + async_trait** make the trait objects (`Arc<dyn ...>`)
// safely shareable across Axum's asynchronous task boundaries.

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Article>, ApiError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, ApiError>;
    /// Persists a new record built verbatim from request parameters. The
    /// incoming `id` is ignored; the store assigns it.
    async fn create(&self, article: Article) -> Result<Article, ApiError>;
    /// Full-field replacement. Returns `None` if the row vanished between
    /// the caller's lookup and this mutation.
    async fn update(&self, id: i64, incoming: Article) -> Result<Option<Article>, ApiError>;
    /// Returns true if a row was actually removed.
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait HelpRequestRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<HelpRequest>, ApiError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<HelpRequest>, ApiError>;
    async fn create(&self, request: HelpRequest) -> Result<HelpRequest, ApiError>;
    async fn update(
        &self,
        id: i64,
        incoming: HelpRequest,
    ) -> Result<Option<HelpRequest>, ApiError>;
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UcsbOrganization>, ApiError>;
    async fn find_by_code(&self, org_code: &str) -> Result<Option<UcsbOrganization>, ApiError>;
    /// The key (`org_code`) is caller-supplied, not generated; uniqueness is
    /// enforced by the store's primary key. Creating under an existing key
    /// replaces that record (save semantics), so the key stays unique.
    async fn create(&self, org: UcsbOrganization) -> Result<UcsbOrganization, ApiError>;
    /// Full-field replacement keyed by the *current* code. The incoming
    /// record's `org_code` replaces the key itself, permitting key change in
    /// place.
    async fn update(
        &self,
        org_code: &str,
        incoming: UcsbOrganization,
    ) -> Result<Option<UcsbOrganization>, ApiError>;
    async fn delete(&self, org_code: &str) -> Result<bool, ApiError>;
}

#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UcsbDiningCommonsMenuItem>, ApiError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError>;
    async fn create(
        &self,
        item: UcsbDiningCommonsMenuItem,
    ) -> Result<UcsbDiningCommonsMenuItem, ApiError>;
    async fn update(
        &self,
        id: i64,
        incoming: UcsbDiningCommonsMenuItem,
    ) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError>;
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;
}

// Concrete types used to share the gateways across the application state.
pub type ArticleRepo = Arc<dyn ArticleRepository>;
pub type HelpRequestRepo = Arc<dyn HelpRequestRepository>;
pub type OrganizationRepo = Arc<dyn OrganizationRepository>;
pub type MenuItemRepo = Arc<dyn MenuItemRepository>;

/// PostgresRepository
///
/// The concrete implementation of all four gateway traits, backed by the
/// PostgreSQL pool. One struct implements all four so the connection pool is
/// shared; each trait still presents a single-table view.
///
/// Queries use the runtime-checked sqlx API (not the compile-time macros) so
/// the crate builds without a live database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresRepository {
    async fn find_all(&self) -> Result<Vec<Article>, ApiError> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT id, title, url, explanation, email, date_added FROM articles",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, ApiError> {
        let article = sqlx::query_as::<_, Article>(
            "SELECT id, title, url, explanation, email, date_added FROM articles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn create(&self, article: Article) -> Result<Article, ApiError> {
        let saved = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (title, url, explanation, email, date_added)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, url, explanation, email, date_added
            "#,
        )
        .bind(article.title)
        .bind(article.url)
        .bind(article.explanation)
        .bind(article.email)
        .bind(article.date_added)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update(&self, id: i64, incoming: Article) -> Result<Option<Article>, ApiError> {
        let updated = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET title = $2, url = $3, explanation = $4, email = $5, date_added = $6
            WHERE id = $1
            RETURNING id, title, url, explanation, email, date_added
            "#,
        )
        .bind(id)
        .bind(incoming.title)
        .bind(incoming.url)
        .bind(incoming.explanation)
        .bind(incoming.email)
        .bind(incoming.date_added)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let res = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl HelpRequestRepository for PostgresRepository {
    async fn find_all(&self) -> Result<Vec<HelpRequest>, ApiError> {
        let requests = sqlx::query_as::<_, HelpRequest>(
            r#"
            SELECT id, requester_email, team_id, table_or_breakout_room,
                   request_time, explanation, solved
            FROM help_requests
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<HelpRequest>, ApiError> {
        let request = sqlx::query_as::<_, HelpRequest>(
            r#"
            SELECT id, requester_email, team_id, table_or_breakout_room,
                   request_time, explanation, solved
            FROM help_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    async fn create(&self, request: HelpRequest) -> Result<HelpRequest, ApiError> {
        let saved = sqlx::query_as::<_, HelpRequest>(
            r#"
            INSERT INTO help_requests
                (requester_email, team_id, table_or_breakout_room, request_time, explanation, solved)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, requester_email, team_id, table_or_breakout_room,
                      request_time, explanation, solved
            "#,
        )
        .bind(request.requester_email)
        .bind(request.team_id)
        .bind(request.table_or_breakout_room)
        .bind(request.request_time)
        .bind(request.explanation)
        .bind(request.solved)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update(
        &self,
        id: i64,
        incoming: HelpRequest,
    ) -> Result<Option<HelpRequest>, ApiError> {
        let updated = sqlx::query_as::<_, HelpRequest>(
            r#"
            UPDATE help_requests
            SET requester_email = $2, team_id = $3, table_or_breakout_room = $4,
                request_time = $5, explanation = $6, solved = $7
            WHERE id = $1
            RETURNING id, requester_email, team_id, table_or_breakout_room,
                      request_time, explanation, solved
            "#,
        )
        .bind(id)
        .bind(incoming.requester_email)
        .bind(incoming.team_id)
        .bind(incoming.table_or_breakout_room)
        .bind(incoming.request_time)
        .bind(incoming.explanation)
        .bind(incoming.solved)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let res = sqlx::query("DELETE FROM help_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl OrganizationRepository for PostgresRepository {
    async fn find_all(&self) -> Result<Vec<UcsbOrganization>, ApiError> {
        let orgs = sqlx::query_as::<_, UcsbOrganization>(
            "SELECT org_code, org_translation_short, org_translation, inactive FROM ucsb_organizations",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orgs)
    }

    async fn find_by_code(&self, org_code: &str) -> Result<Option<UcsbOrganization>, ApiError> {
        let org = sqlx::query_as::<_, UcsbOrganization>(
            r#"
            SELECT org_code, org_translation_short, org_translation, inactive
            FROM ucsb_organizations
            WHERE org_code = $1
            "#,
        )
        .bind(org_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(org)
    }

    async fn create(&self, org: UcsbOrganization) -> Result<UcsbOrganization, ApiError> {
        let saved = sqlx::query_as::<_, UcsbOrganization>(
            r#"
            INSERT INTO ucsb_organizations (org_code, org_translation_short, org_translation, inactive)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (org_code) DO UPDATE
            SET org_translation_short = EXCLUDED.org_translation_short,
                org_translation = EXCLUDED.org_translation,
                inactive = EXCLUDED.inactive
            RETURNING org_code, org_translation_short, org_translation, inactive
            "#,
        )
        .bind(org.org_code)
        .bind(org.org_translation_short)
        .bind(org.org_translation)
        .bind(org.inactive)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update(
        &self,
        org_code: &str,
        incoming: UcsbOrganization,
    ) -> Result<Option<UcsbOrganization>, ApiError> {
        // The key itself is mutable here: $2 may differ from $1.
        let updated = sqlx::query_as::<_, UcsbOrganization>(
            r#"
            UPDATE ucsb_organizations
            SET org_code = $2, org_translation_short = $3, org_translation = $4, inactive = $5
            WHERE org_code = $1
            RETURNING org_code, org_translation_short, org_translation, inactive
            "#,
        )
        .bind(org_code)
        .bind(incoming.org_code)
        .bind(incoming.org_translation_short)
        .bind(incoming.org_translation)
        .bind(incoming.inactive)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, org_code: &str) -> Result<bool, ApiError> {
        let res = sqlx::query("DELETE FROM ucsb_organizations WHERE org_code = $1")
            .bind(org_code)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl MenuItemRepository for PostgresRepository {
    async fn find_all(&self) -> Result<Vec<UcsbDiningCommonsMenuItem>, ApiError> {
        let items = sqlx::query_as::<_, UcsbDiningCommonsMenuItem>(
            "SELECT id, dining_commons_code, name, station FROM ucsb_dining_commons_menu_items",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError> {
        let item = sqlx::query_as::<_, UcsbDiningCommonsMenuItem>(
            r#"
            SELECT id, dining_commons_code, name, station
            FROM ucsb_dining_commons_menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn create(
        &self,
        item: UcsbDiningCommonsMenuItem,
    ) -> Result<UcsbDiningCommonsMenuItem, ApiError> {
        let saved = sqlx::query_as::<_, UcsbDiningCommonsMenuItem>(
            r#"
            INSERT INTO ucsb_dining_commons_menu_items (dining_commons_code, name, station)
            VALUES ($1, $2, $3)
            RETURNING id, dining_commons_code, name, station
            "#,
        )
        .bind(item.dining_commons_code)
        .bind(item.name)
        .bind(item.station)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn update(
        &self,
        id: i64,
        incoming: UcsbDiningCommonsMenuItem,
    ) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError> {
        let updated = sqlx::query_as::<_, UcsbDiningCommonsMenuItem>(
            r#"
            UPDATE ucsb_dining_commons_menu_items
            SET dining_commons_code = $2, name = $3, station = $4
            WHERE id = $1
            RETURNING id, dining_commons_code, name, station
            "#,
        )
        .bind(id)
        .bind(incoming.dining_commons_code)
        .bind(incoming.name)
        .bind(incoming.station)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let res = sqlx::query("DELETE FROM ucsb_dining_commons_menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

/// InMemoryRepository
///
/// A `Mutex`-backed implementation of all four gateways, used by the test
/// suite and local experimentation. Insertion order is preserved, so
/// find_all returns records in store order, matching the contract the
/// Postgres implementation provides.
///
/// The locks are only ever held for the duration of a synchronous
/// read/mutate, never across an await point.
#[derive(Default)]
pub struct InMemoryRepository {
    articles: Mutex<Vec<Article>>,
    next_article_id: AtomicI64,
    help_requests: Mutex<Vec<HelpRequest>>,
    next_help_request_id: AtomicI64,
    organizations: Mutex<Vec<UcsbOrganization>>,
    menu_items: Mutex<Vec<UcsbDiningCommonsMenuItem>>,
    next_menu_item_id: AtomicI64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            next_article_id: AtomicI64::new(1),
            next_help_request_id: AtomicI64::new(1),
            next_menu_item_id: AtomicI64::new(1),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ArticleRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Article>, ApiError> {
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, ApiError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, mut article: Article) -> Result<Article, ApiError> {
        article.id = self.next_article_id.fetch_add(1, Ordering::SeqCst);
        self.articles.lock().unwrap().push(article.clone());
        Ok(article)
    }

    async fn update(&self, id: i64, mut incoming: Article) -> Result<Option<Article>, ApiError> {
        let mut articles = self.articles.lock().unwrap();
        match articles.iter_mut().find(|a| a.id == id) {
            Some(existing) => {
                incoming.id = id;
                *existing = incoming.clone();
                Ok(Some(incoming))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() < before)
    }
}

#[async_trait]
impl HelpRequestRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<HelpRequest>, ApiError> {
        Ok(self.help_requests.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<HelpRequest>, ApiError> {
        Ok(self
            .help_requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create(&self, mut request: HelpRequest) -> Result<HelpRequest, ApiError> {
        request.id = self.next_help_request_id.fetch_add(1, Ordering::SeqCst);
        self.help_requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    async fn update(
        &self,
        id: i64,
        mut incoming: HelpRequest,
    ) -> Result<Option<HelpRequest>, ApiError> {
        let mut requests = self.help_requests.lock().unwrap();
        match requests.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                incoming.id = id;
                *existing = incoming.clone();
                Ok(Some(incoming))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut requests = self.help_requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        Ok(requests.len() < before)
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<UcsbOrganization>, ApiError> {
        Ok(self.organizations.lock().unwrap().clone())
    }

    async fn find_by_code(&self, org_code: &str) -> Result<Option<UcsbOrganization>, ApiError> {
        Ok(self
            .organizations
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.org_code == org_code)
            .cloned())
    }

    async fn create(&self, org: UcsbOrganization) -> Result<UcsbOrganization, ApiError> {
        let mut orgs = self.organizations.lock().unwrap();
        match orgs.iter_mut().find(|o| o.org_code == org.org_code) {
            Some(existing) => *existing = org.clone(),
            None => orgs.push(org.clone()),
        }
        Ok(org)
    }

    async fn update(
        &self,
        org_code: &str,
        incoming: UcsbOrganization,
    ) -> Result<Option<UcsbOrganization>, ApiError> {
        let mut orgs = self.organizations.lock().unwrap();
        match orgs.iter_mut().find(|o| o.org_code == org_code) {
            Some(existing) => {
                *existing = incoming.clone();
                Ok(Some(incoming))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, org_code: &str) -> Result<bool, ApiError> {
        let mut orgs = self.organizations.lock().unwrap();
        let before = orgs.len();
        orgs.retain(|o| o.org_code != org_code);
        Ok(orgs.len() < before)
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<UcsbDiningCommonsMenuItem>, ApiError> {
        Ok(self.menu_items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError> {
        Ok(self
            .menu_items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn create(
        &self,
        mut item: UcsbDiningCommonsMenuItem,
    ) -> Result<UcsbDiningCommonsMenuItem, ApiError> {
        item.id = self.next_menu_item_id.fetch_add(1, Ordering::SeqCst);
        self.menu_items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: i64,
        mut incoming: UcsbDiningCommonsMenuItem,
    ) -> Result<Option<UcsbDiningCommonsMenuItem>, ApiError> {
        let mut items = self.menu_items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == id) {
            Some(existing) => {
                incoming.id = id;
                *existing = incoming.clone();
                Ok(Some(incoming))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut items = self.menu_items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }
}
