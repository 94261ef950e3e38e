//! Custom error types for the blog service
//!
//! Handlers and repositories fail with [`ApiError`]; the `IntoResponse`
//! implementation translates every variant into the `{"detail": ...}`
//! envelope the HTTP contract requires. Store failures are logged here and
//! surfaced to the caller as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the blog service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed field validation
    #[error("{0}")]
    Validation(String),

    /// Malformed or duplicate input that is not a validation bound
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid, or expired bearer token
    #[error("Not authenticated")]
    Unauthenticated,

    /// Login with unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated but not allowed to act on the resource
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict (duplicate vote, duplicate title)
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "detail": detail,
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler and repository results
pub type ApiResult<T> = Result<T, ApiError>;

/// Check whether a sqlx error is a Postgres unique violation on the
/// given constraint. Used as the backstop when a racing request slips
/// past an application-level existence check.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn response_parts(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_unauthenticated_is_uniform_401() {
        let (status, body) = response_parts(ApiError::Unauthenticated).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"detail": "Not authenticated"}));
    }

    #[tokio::test]
    async fn test_not_found_carries_message() {
        let (status, body) =
            response_parts(ApiError::NotFound("Post with id 7 not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Post with id 7 not found");
    }

    #[tokio::test]
    async fn test_conflict_is_409() {
        let (status, _) = response_parts(ApiError::Conflict(
            "You have already upvoted this post".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_forbidden_is_403() {
        let (status, _) = response_parts(ApiError::Forbidden(
            "Not authorized to perform requested action".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_validation_is_422() {
        let (status, body) = response_parts(ApiError::Validation(
            "Title must be at least 5 characters long".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "Title must be at least 5 characters long");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let (status, body) = response_parts(ApiError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Database error");
    }

    #[test]
    fn test_is_unique_violation_ignores_other_errors() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound, "votes_pkey"));
    }
}
