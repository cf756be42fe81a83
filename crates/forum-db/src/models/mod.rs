//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod comment;
mod post;
mod reaction;

pub use account::AccountModel;
pub use comment::CommentModel;
pub use post::PostModel;
pub use reaction::{CountersModel, LedgerEntryModel};
