//! Blog service models

pub mod post;
pub mod user;
pub mod vote;

// Re-export for convenience
pub use post::{CreatePostRequest, Post, PostResponse, PostWithVotes, UpdatePostRequest};
pub use user::{CreateUserRequest, User, UserResponse, UserWithPosts};
pub use vote::{VoteDirection, VoteRequest, VoteTransition, transition};
