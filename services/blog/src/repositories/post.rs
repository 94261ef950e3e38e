//! Post repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::error::{ApiError, ApiResult, is_unique_violation};
use crate::models::{
    CreatePostRequest, Post, PostResponse, PostWithVotes, UpdatePostRequest, UserResponse,
};

/// Normalized listing parameters (limit already clamped by the handler)
#[derive(Debug, Clone)]
pub struct PostListParams {
    pub limit: i64,
    pub offset: i64,
    pub search: String,
}

const DUPLICATE_TITLE: &str = "A post with this title already exists";

/// Post repository
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List posts with aggregate vote counts, newest id first
    ///
    /// The LEFT JOIN keeps zero-vote posts in the result with a count of
    /// zero. An empty search string matches every title. When `author_id`
    /// is set, the listing is scoped to that author ("my posts").
    pub async fn list(
        &self,
        params: &PostListParams,
        author_id: Option<i64>,
    ) -> ApiResult<Vec<PostWithVotes>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, p.content, p.published, p.rating,
                   p.created_at, p.updated_at, p.author_id,
                   u.email AS author_email, u.username AS author_username,
                   u.created_at AS author_created_at,
                   COUNT(v.user_id) AS votes
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN votes v ON v.post_id = p.id
            WHERE p.title ILIKE '%' || $1 || '%'
              AND ($2::BIGINT IS NULL OR p.author_id = $2)
            GROUP BY p.id, u.id
            ORDER BY p.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&params.search)
        .bind(author_id)
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(post_with_votes_from_row).collect())
    }

    /// Fetch a single post with its vote count and author
    pub async fn find_with_votes(&self, id: i64) -> ApiResult<Option<PostWithVotes>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.title, p.content, p.published, p.rating,
                   p.created_at, p.updated_at, p.author_id,
                   u.email AS author_email, u.username AS author_username,
                   u.created_at AS author_created_at,
                   COUNT(v.user_id) AS votes
            FROM posts p
            JOIN users u ON u.id = p.author_id
            LEFT JOIN votes v ON v.post_id = p.id
            WHERE p.id = $1
            GROUP BY p.id, u.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(post_with_votes_from_row))
    }

    /// Fetch all posts by one author, newest id first
    pub async fn posts_by_author(&self, author_id: i64) -> ApiResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, published, rating, created_at, updated_at, author_id
            FROM posts
            WHERE author_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Fetch the most recently created post
    pub async fn latest(&self) -> ApiResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, published, rating, created_at, updated_at, author_id
            FROM posts
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Create a new post owned by `author_id`
    pub async fn create(&self, author_id: i64, request: &CreatePostRequest) -> ApiResult<Post> {
        info!("Creating post for user {}", author_id);

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, published, rating, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, content, published, rating, created_at, updated_at, author_id
            "#,
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.published.unwrap_or(true))
        .bind(request.rating.unwrap_or(0.0))
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "posts_title_key") {
                ApiError::Conflict(DUPLICATE_TITLE.to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        Ok(post)
    }

    /// Partially update a post owned by `current_user_id`
    ///
    /// Existence is checked before ownership so a missing post yields 404
    /// rather than 403. The row is locked for the duration of the
    /// transaction.
    pub async fn update(
        &self,
        id: i64,
        current_user_id: i64,
        changes: &UpdatePostRequest,
    ) -> ApiResult<Post> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, published, rating, created_at, updated_at, author_id
            FROM posts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Post with id {} not found", id)))?;

        if existing.author_id != current_user_id {
            return Err(ApiError::Forbidden(
                "Not authorized to perform requested action".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                published = COALESCE($4, published),
                rating = COALESCE($5, rating),
                updated_at = now()
            WHERE id = $1
            RETURNING id, title, content, published, rating, created_at, updated_at, author_id
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.published)
        .bind(changes.rating)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "posts_title_key") {
                ApiError::Conflict(DUPLICATE_TITLE.to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a post owned by `current_user_id`
    pub async fn delete(&self, id: i64, current_user_id: i64) -> ApiResult<()> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT author_id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Post with id {} not found", id)))?;

        let author_id: i64 = existing.get("author_id");
        if author_id != current_user_id {
            return Err(ApiError::Forbidden(
                "Not authorized to perform requested action".to_string(),
            ));
        }

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Map a joined post/author/count row into the listing envelope
fn post_with_votes_from_row(row: PgRow) -> PostWithVotes {
    let author = UserResponse {
        id: row.get("author_id"),
        email: row.get("author_email"),
        username: row.get("author_username"),
        created_at: row.get("author_created_at"),
    };

    let post = PostResponse {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        published: row.get("published"),
        rating: row.get("rating"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        author_id: row.get("author_id"),
        author: Some(author),
    };

    PostWithVotes {
        post,
        votes: row.get("votes"),
    }
}
