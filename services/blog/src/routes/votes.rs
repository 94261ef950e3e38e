//! Vote routes

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{User, VoteDirection, VoteRequest};
use crate::repositories::VoteOutcome;
use crate::state::AppState;

/// Cast or remove a vote on a post
pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(current_user): Extension<User>,
    Json(payload): Json<VoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let direction = VoteDirection::from_dir(payload.dir)
        .ok_or_else(|| ApiError::Validation("dir must be 0 or 1".to_string()))?;

    let outcome = state
        .vote_repository
        .cast(current_user.id, payload.post_id, direction)
        .await?;

    let message = match outcome {
        VoteOutcome::Upvoted => "Successfully upvoted post",
        // Trailing period is part of the wire contract.
        VoteOutcome::Downvoted => "Successfully downvoted post.",
    };

    Ok((StatusCode::CREATED, Json(json!({"message": message}))))
}
