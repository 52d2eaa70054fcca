use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// ApiError
///
/// The single error type every handler returns. Each variant maps to exactly
/// one HTTP response shape, so error serialization lives here and nowhere
/// else.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller is unauthenticated or lacks the role the route requires.
    #[error("forbidden")]
    Forbidden,

    /// The requested key has no corresponding record. Carries the entity
    /// kind (e.g. "UCSBOrganization") and the missing key, and serializes to
    /// the body shape the frontend matches on:
    /// `{"type": "EntityNotFoundException", "message": "<Kind> with id <key> not found"}`.
    #[error("{kind} with id {key} not found")]
    EntityNotFound { kind: &'static str, key: String },

    /// A store failure. Surfaced as a generic 500; the underlying error is
    /// logged, never leaked to the client.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::EntityNotFound {
            kind,
            key: key.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::EntityNotFound { .. } => {
                let body = json!({
                    "type": "EntityNotFoundException",
                    "message": self.to_string(),
                });
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Database(e) => {
                tracing::error!("database error: {:?}", e);
                let body = json!({ "message": "internal server error" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
