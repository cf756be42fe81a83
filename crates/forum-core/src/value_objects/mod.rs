//! Value objects - immutable types that represent domain concepts

mod ids;
mod vote;

pub use ids::{AccountId, CommentId, IdParseError, PostId};
pub use vote::{CounterDelta, CounterField, ReactionCounters, Vote, VoteParseError};
