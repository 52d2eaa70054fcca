use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Core Application Schemas (Mapped to Database) ---
//
// Every entity serializes with camelCase field names, matching the wire
// format the frontend already consumes (`orgCode`, `requesterEmail`, ...).
// Database columns stay snake_case and map via the Rust field idents.

/// Article
///
/// A curated link record from the `public.articles` table.
///
/// `date_added` is deliberately a plain string: the API documents a
/// `YYYY-MM-DD` expectation but does not enforce it, and the value is stored
/// and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Article {
    /// Store-generated primary key. Defaults to 0 when absent from an
    /// incoming update body; the stored id always wins for this entity.
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub email: String,
    /// Expected format `YYYY-MM-DD` (documented, not enforced).
    pub date_added: String,
}

/// HelpRequest
///
/// A request for help at a team table or breakout room, from the
/// `public.help_requests` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HelpRequest {
    #[serde(default)]
    pub id: i64,
    pub requester_email: String,
    pub team_id: String,
    pub table_or_breakout_room: String,
    /// ISO-8601 date-time (`YYYY-MM-DDTHH:MM:SS`). A malformed value fails
    /// request binding before any handler logic runs.
    #[ts(type = "string")]
    pub request_time: NaiveDateTime,
    pub explanation: String,
    pub solved: bool,
}

/// UCSBOrganization
///
/// A campus organization record from the `public.ucsb_organizations` table.
///
/// Unlike the other entities, the primary key (`org_code`) is caller-supplied
/// rather than store-generated, and a full-replacement update may change it
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UcsbOrganization {
    pub org_code: String,
    pub org_translation_short: String,
    pub org_translation: String,
    pub inactive: bool,
}

/// UCSBDiningCommonsMenuItem
///
/// A single menu item served at a dining commons station, from the
/// `public.ucsb_dining_commons_menu_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UcsbDiningCommonsMenuItem {
    #[serde(default)]
    pub id: i64,
    pub dining_commons_code: String,
    pub name: String,
    pub station: String,
}
