//! Data access layer
//!
//! Each repository owns a pool handle and exposes the operations the
//! handlers need. Mutating sequences (existence check, ownership check,
//! write) run inside a single transaction so a concurrent request cannot
//! interleave an inconsistent read-then-write; uniqueness constraints
//! back the checks up at the store level.

pub mod post;
pub mod user;
pub mod vote;

pub use post::{PostListParams, PostRepository};
pub use user::UserRepository;
pub use vote::{VoteOutcome, VoteRepository};
