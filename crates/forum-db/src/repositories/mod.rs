//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.

mod account;
mod comment;
mod error;
mod post;
mod reaction;
mod token;

pub use account::PgAccountRepository;
pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionStore;
pub use token::PgTokenRepository;
