//! Reactable capability - what an entity must provide to accumulate votes

use std::fmt;
use std::hash::Hash;

use crate::entities::{Comment, Post};
use crate::error::DomainError;
use crate::value_objects::{CommentId, PostId};

/// Kinds of entities that carry like/dislike counters.
///
/// Each kind has its own independent ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactableKind {
    Post,
    Comment,
}

impl ReactableKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ReactableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity that can be liked and disliked
pub trait Reactable: Send + Sync + 'static {
    /// Typed identifier of the entity
    type Id: Copy
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + From<i64>
        + Into<i64>
        + Send
        + Sync
        + 'static;

    const KIND: ReactableKind;

    /// Error returned when no entity with `id` exists
    fn not_found(id: Self::Id) -> DomainError;
}

impl Reactable for Post {
    type Id = PostId;
    const KIND: ReactableKind = ReactableKind::Post;

    fn not_found(id: PostId) -> DomainError {
        DomainError::PostNotFound(id)
    }
}

impl Reactable for Comment {
    type Id = CommentId;
    const KIND: ReactableKind = ReactableKind::Comment;

    fn not_found(id: CommentId) -> DomainError {
        DomainError::CommentNotFound(id)
    }
}
