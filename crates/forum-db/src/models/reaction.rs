//! Reaction ledger and counter models

use sqlx::FromRow;

/// A row of `post_reactions` or `comment_reactions`, key column aliased to `reactable_id`
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryModel {
    pub account_id: i64,
    pub reactable_id: i64,
    pub vote: String,
}

/// Counter columns of a reactable
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CountersModel {
    pub likes: i32,
    pub dislikes: i32,
}
