//! Comment entity - a reactable reply attached to a post

use chrono::{DateTime, Utc};

use crate::value_objects::{AccountId, CommentId, PostId, ReactionCounters};

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub published: bool,
    pub author_id: AccountId,
    pub post_id: PostId,
    pub counters: ReactionCounters,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    #[inline]
    pub fn is_authored_by(&self, account_id: AccountId) -> bool {
        self.author_id == account_id
    }

    pub fn edit(&mut self, content: Option<String>, published: Option<bool>) {
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(published) = published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub published: bool,
    pub author_id: AccountId,
    pub post_id: PostId,
}
