//! # forum-core
//!
//! Domain layer containing entities, value objects, the like/dislike transition rules,
//! and the repository traits (ports) implemented by the infrastructure crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Account, Comment, LedgerEntry, LedgerOp, NewAccount, NewComment, NewPost, Post,
    ReactionChange,
};
pub use error::DomainError;
pub use traits::{
    AccountRepository, CommentRepository, PostRepository, Reactable, ReactableKind,
    ReactionStore, RepoResult, TokenRepository,
};
pub use value_objects::{
    AccountId, CommentId, CounterDelta, CounterField, IdParseError, PostId, ReactionCounters, Vote,
    VoteParseError,
};
