//! Vote repository: persistence half of the vote state machine
//!
//! The whole sequence (post existence, current vote state, write) runs in
//! one transaction. The composite primary key on (user_id, post_id) is the
//! backstop: a duplicate insert racing past the existence check still
//! surfaces as a conflict rather than a second row.

use sqlx::PgPool;
use tracing::info;

use crate::error::{ApiError, ApiResult, is_unique_violation};
use crate::models::{VoteDirection, VoteTransition, transition};

const POST_NOT_FOUND: &str = "Post not found";
const ALREADY_UPVOTED: &str = "You have already upvoted this post";

/// Result of a successful vote transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Upvoted,
    Downvoted,
}

/// Vote repository
#[derive(Clone)]
pub struct VoteRepository {
    pool: PgPool,
}

impl VoteRepository {
    /// Create a new vote repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a vote direction for a (user, post) pair
    ///
    /// Post existence is checked first; a missing post is 404 regardless of
    /// direction. A `dir=0` with no existing vote also reports
    /// "Post not found" — the original wire contract, preserved verbatim.
    pub async fn cast(
        &self,
        user_id: i64,
        post_id: i64,
        direction: VoteDirection,
    ) -> ApiResult<VoteOutcome> {
        let mut tx = self.pool.begin().await?;

        let post_exists = sqlx::query("SELECT id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !post_exists {
            return Err(ApiError::NotFound(POST_NOT_FOUND.to_string()));
        }

        let has_existing_vote =
            sqlx::query("SELECT 1 FROM votes WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();

        match transition(direction, has_existing_vote) {
            VoteTransition::Insert => {
                sqlx::query("INSERT INTO votes (user_id, post_id) VALUES ($1, $2)")
                    .bind(user_id)
                    .bind(post_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e, "votes_pkey") {
                            ApiError::Conflict(ALREADY_UPVOTED.to_string())
                        } else {
                            ApiError::Database(e)
                        }
                    })?;

                tx.commit().await?;
                info!("User {} upvoted post {}", user_id, post_id);
                Ok(VoteOutcome::Upvoted)
            }
            VoteTransition::AlreadyVoted => {
                Err(ApiError::Conflict(ALREADY_UPVOTED.to_string()))
            }
            VoteTransition::Remove => {
                sqlx::query("DELETE FROM votes WHERE user_id = $1 AND post_id = $2")
                    .bind(user_id)
                    .bind(post_id)
                    .execute(&mut *tx)
                    .await?;

                tx.commit().await?;
                info!("User {} removed vote on post {}", user_id, post_id);
                Ok(VoteOutcome::Downvoted)
            }
            VoteTransition::NoExistingVote => {
                Err(ApiError::NotFound(POST_NOT_FOUND.to_string()))
            }
        }
    }
}
