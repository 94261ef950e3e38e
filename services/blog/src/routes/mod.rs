//! Blog service routes

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::auth_middleware;
use crate::state::AppState;

pub mod auth;
pub mod posts;
pub mod users;
pub mod votes;

/// Create the router for the blog service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/posts/", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/user-posts", get(posts::list_user_posts))
        .route("/api/posts/latest/recent", get(posts::latest_post))
        .route(
            "/api/posts/:post_id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/api/vote/", post(votes::cast_vote))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/users/", post(users::create_user))
        .route("/api/users/:user_id", get(users::get_user))
        .route("/api/auth/login", post(auth::login))
        .merge(protected_routes)
        .with_state(state)
}

/// Root route returns a simple welcome message
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to my API"
    }))
}

/// Health check endpoint with a lightweight database ping
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let healthy = common::database::health_check(&state.db_pool)
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    if healthy {
        Ok(Json(json!({"status": "healthy"})))
    } else {
        Err(ApiError::Internal(anyhow::anyhow!(
            "Database connection failed"
        )))
    }
}
