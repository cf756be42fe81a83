//! Domain entities - core business objects

mod account;
mod comment;
mod post;
mod reaction;

pub use account::{Account, NewAccount};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
pub use reaction::{LedgerEntry, LedgerOp, ReactionChange};
