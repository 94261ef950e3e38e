//! Vote payloads and the per-(user, post) vote state machine
//!
//! A vote row's existence is the entire vote signal: there is no stored
//! direction. "Downvote" removes an existing row rather than recording a
//! negative value.

use serde::Deserialize;

/// Request body for `POST /api/vote/`
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub post_id: i64,
    pub dir: i16,
}

/// Vote direction as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    /// `dir = 1`: cast an upvote
    Up,
    /// `dir = 0`: remove an existing upvote
    Down,
}

impl VoteDirection {
    /// Parse the wire value; anything outside {0, 1} is invalid.
    pub fn from_dir(dir: i16) -> Option<Self> {
        match dir {
            1 => Some(VoteDirection::Up),
            0 => Some(VoteDirection::Down),
            _ => None,
        }
    }
}

/// Outcome of applying a direction to the current vote state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No vote yet and `dir = 1`: persist a new vote row
    Insert,
    /// Existing vote and `dir = 0`: delete the vote row
    Remove,
    /// Existing vote and `dir = 1`: reject as a duplicate upvote
    AlreadyVoted,
    /// No vote and `dir = 0`: nothing to remove
    NoExistingVote,
}

/// Decide the transition for a (direction, current state) pair.
///
/// Pure function; the repository performs the matching persistence step
/// inside its transaction.
pub fn transition(direction: VoteDirection, has_existing_vote: bool) -> VoteTransition {
    match (direction, has_existing_vote) {
        (VoteDirection::Up, false) => VoteTransition::Insert,
        (VoteDirection::Up, true) => VoteTransition::AlreadyVoted,
        (VoteDirection::Down, true) => VoteTransition::Remove,
        (VoteDirection::Down, false) => VoteTransition::NoExistingVote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(VoteDirection::from_dir(1), Some(VoteDirection::Up));
        assert_eq!(VoteDirection::from_dir(0), Some(VoteDirection::Down));
        assert_eq!(VoteDirection::from_dir(2), None);
        assert_eq!(VoteDirection::from_dir(-1), None);
    }

    #[test]
    fn test_upvote_without_existing_vote_inserts() {
        assert_eq!(
            transition(VoteDirection::Up, false),
            VoteTransition::Insert
        );
    }

    #[test]
    fn test_duplicate_upvote_is_rejected() {
        assert_eq!(
            transition(VoteDirection::Up, true),
            VoteTransition::AlreadyVoted
        );
    }

    #[test]
    fn test_downvote_removes_existing_vote() {
        assert_eq!(
            transition(VoteDirection::Down, true),
            VoteTransition::Remove
        );
    }

    #[test]
    fn test_downvote_without_existing_vote_has_nothing_to_remove() {
        assert_eq!(
            transition(VoteDirection::Down, false),
            VoteTransition::NoExistingVote
        );
    }
}
