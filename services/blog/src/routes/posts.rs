//! Post routes: listing, search, pagination, and owner-gated mutation

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::config::PaginationConfig;
use crate::error::ApiError;
use crate::models::{
    CreatePostRequest, PostResponse, UpdatePostRequest, User, UserResponse,
};
use crate::repositories::PostListParams;
use crate::state::AppState;
use crate::validation;

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

/// Clamp a caller-supplied limit into [1, max], falling back to the
/// configured default when absent.
pub(crate) fn clamp_limit(limit: Option<i64>, pagination: &PaginationConfig) -> i64 {
    limit
        .unwrap_or(pagination.default_limit)
        .clamp(1, pagination.max_limit)
}

fn list_params(query: ListQuery, pagination: &PaginationConfig) -> PostListParams {
    PostListParams {
        limit: clamp_limit(query.limit, pagination),
        offset: query.offset.unwrap_or(0).max(0),
        search: query.search.unwrap_or_default(),
    }
}

/// List all posts with vote counts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = list_params(query, &state.config.pagination);
    let posts = state.post_repository.list(&params, None).await?;
    Ok(Json(posts))
}

/// List the caller's own posts with vote counts
pub async fn list_user_posts(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let params = list_params(query, &state.config.pagination);
    let posts = state
        .post_repository
        .list(&params, Some(current_user.id))
        .await?;
    Ok(Json(posts))
}

/// Get a post by its unique ID, with its vote count
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .post_repository
        .find_with_votes(post_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Post with id {} not found", post_id)))?;

    Ok(Json(post))
}

/// Get the most recently created post
pub async fn latest_post(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .post_repository
        .latest()
        .await?
        .ok_or_else(|| ApiError::NotFound("No posts available".to_string()))?;

    Ok(Json(PostResponse::from_post(post, None)))
}

/// Create a new post owned by the caller
pub async fn create_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_title(&payload.title).map_err(ApiError::Validation)?;
    validation::validate_content(&payload.content).map_err(ApiError::Validation)?;

    let post = state
        .post_repository
        .create(current_user.id, &payload)
        .await?;

    let author = UserResponse::from(&current_user);
    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_post(post, Some(author))),
    ))
}

/// Partially update a post; only its author may do so
pub async fn update_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(title) = &payload.title {
        validation::validate_title(title).map_err(ApiError::Validation)?;
    }
    if let Some(content) = &payload.content {
        validation::validate_content(content).map_err(ApiError::Validation)?;
    }

    let post = state
        .post_repository
        .update(post_id, current_user.id, &payload)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(PostResponse::from_post(post, None)),
    ))
}

/// Delete a post; only its author may do so
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .post_repository
        .delete(post_id, current_user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_limit: 100,
            max_limit: 100,
        }
    }

    #[test]
    fn test_clamp_limit_default() {
        assert_eq!(clamp_limit(None, &pagination()), 100);
    }

    #[test]
    fn test_clamp_limit_over_max() {
        assert_eq!(clamp_limit(Some(500), &pagination()), 100);
    }

    #[test]
    fn test_clamp_limit_in_range() {
        assert_eq!(clamp_limit(Some(2), &pagination()), 2);
    }

    #[test]
    fn test_clamp_limit_floor() {
        assert_eq!(clamp_limit(Some(0), &pagination()), 1);
        assert_eq!(clamp_limit(Some(-5), &pagination()), 1);
    }

    #[test]
    fn test_list_params_defaults() {
        let params = list_params(ListQuery::default(), &pagination());
        assert_eq!(params.limit, 100);
        assert_eq!(params.offset, 0);
        assert_eq!(params.search, "");
    }

    #[test]
    fn test_list_params_negative_offset_is_zeroed() {
        let query = ListQuery {
            limit: Some(2),
            offset: Some(-10),
            search: Some("rust".to_string()),
        };
        let params = list_params(query, &pagination());
        assert_eq!(params.limit, 2);
        assert_eq!(params.offset, 0);
        assert_eq!(params.search, "rust");
    }
}
