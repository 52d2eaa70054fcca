/// Router Module Index
///
/// Organizes the routing logic into one module per resource, plus the
/// unauthenticated public routes. Every resource router is mounted at the
/// application root and wrapped in the authentication layer; role
/// segregation (USER read / ADMIN write) is enforced per handler, since the
/// read and write routes for a resource share paths and differ only by
/// method.

/// Unauthenticated routes (health probe).
pub mod public;

/// Articles resource: /articles/all, /articles/post, /articles.
pub mod articles;

/// HelpRequest resource: /helprequest/all, /helprequest/post, /helprequest.
pub mod help_requests;

/// UCSBOrganization resource: /ucsborganization/all, /ucsborganization/post,
/// /ucsborganization. Keyed by `orgCode` rather than a generated id.
pub mod organizations;

/// UCSBDiningCommonsMenuItem resource: /ucsbdiningcommonsmenuitem/all,
/// /ucsbdiningcommonsmenuitem/post, /ucsbdiningcommonsmenuitem.
pub mod menu_items;
