//! Post model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserResponse;

/// Post entity
///
/// `author_id` is immutable after creation; no update path touches it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: i64,
}

/// Request for post creation
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub published: Option<bool>,
    pub rating: Option<f64>,
}

/// Partial update payload for a post
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub rating: Option<f64>,
}

/// Response for post operations, optionally carrying the author
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
}

impl PostResponse {
    pub fn from_post(post: Post, author: Option<UserResponse>) -> Self {
        PostResponse {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            rating: post.rating,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author_id: post.author_id,
            author,
        }
    }
}

/// Listing envelope pairing a post with its aggregate vote count
#[derive(Debug, Serialize)]
pub struct PostWithVotes {
    #[serde(rename = "Post")]
    pub post: PostResponse,
    pub votes: i64,
}
