//! Authentication routes

use axum::{Form, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::password;
use crate::state::AppState;

/// Form-encoded login request; `username` carries the email
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User login endpoint
///
/// Unknown email and wrong password produce the same 401 so callers
/// cannot probe which emails are registered.
pub async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::Validation("Invalid credentials".to_string()));
    }

    info!("Login attempt for {}", credentials.username);

    let user = state
        .user_repository
        .find_by_email(&credentials.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(&credentials.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.token_service.issue(user.id)?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
