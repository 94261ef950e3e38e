//! Application state shared across handlers

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::jwt::TokenService;
use crate::repositories::{PostRepository, UserRepository, VoteRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub token_service: TokenService,
    pub user_repository: UserRepository,
    pub post_repository: PostRepository,
    pub vote_repository: VoteRepository,
}
