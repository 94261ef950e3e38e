//! Identity-resolving middleware
//!
//! Runs before every protected handler: extracts the bearer token,
//! verifies it, and loads the matching user row into the request
//! extensions as the current actor. Missing token, bad token, expired
//! token, and a decoded id with no matching user all produce the same
//! 401 so callers cannot tell which case occurred.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract and validate the bearer token, then resolve the user
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let user_id = state.token_service.verify(token).map_err(|e| {
        debug!("Token verification failed: {}", e);
        ApiError::Unauthenticated
    })?;

    // A token for a since-deleted user is indistinguishable from a bad
    // token on the wire.
    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
