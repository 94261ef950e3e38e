//! User repository for database operations

use sqlx::PgPool;
use tracing::info;

use crate::error::{ApiError, ApiResult, is_unique_violation};
use crate::models::{CreateUserRequest, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already-hashed password
    ///
    /// Email and username are checked separately so the caller gets a
    /// specific message; the unique indexes catch whatever races past
    /// those checks.
    pub async fn create(&self, request: &CreateUserRequest, password_hash: &str) -> ApiResult<User> {
        info!("Creating new user: {}", request.username);

        let mut tx = self.pool.begin().await?;

        let email_taken = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if email_taken {
            return Err(ApiError::BadRequest("Email already registered".to_string()));
        }

        let username_taken = sqlx::query("SELECT id FROM users WHERE username = $1")
            .bind(&request.username)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if username_taken {
            return Err(ApiError::BadRequest(
                "Username already registered".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(&request.email)
        .bind(&request.username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "users_email_key") {
                ApiError::BadRequest("Email already registered".to_string())
            } else if is_unique_violation(&e, "users_username_key") {
                ApiError::BadRequest("Username already registered".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
