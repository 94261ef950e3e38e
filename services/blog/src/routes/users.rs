//! User registration and lookup routes

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::error::ApiError;
use crate::models::{CreateUserRequest, PostResponse, UserResponse, UserWithPosts};
use crate::password;
use crate::state::AppState;
use crate::validation;

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let password_hash = password::hash_password(&payload.password)?;
    let user = state.user_repository.create(&payload, &password_hash).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get a user by ID, with their posts embedded
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", user_id)))?;

    let posts = state
        .post_repository
        .posts_by_author(user.id)
        .await?
        .into_iter()
        .map(|post| PostResponse::from_post(post, None))
        .collect();

    Ok(Json(UserWithPosts {
        user: UserResponse::from(user),
        posts,
    }))
}
