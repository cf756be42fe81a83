//! Traits (ports) implemented by the infrastructure layer

mod reactable;
mod repositories;

pub use reactable::{Reactable, ReactableKind};
pub use repositories::{
    AccountRepository, CommentRepository, PostRepository, ReactionStore, RepoResult,
    TokenRepository,
};
