//! Post entity - a titled, reactable publication

use chrono::{DateTime, Utc};

use crate::value_objects::{AccountId, PostId, ReactionCounters};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub published: bool,
    pub author_id: AccountId,
    pub counters: ReactionCounters,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check whether the given account wrote this post
    #[inline]
    pub fn is_authored_by(&self, account_id: AccountId) -> bool {
        self.author_id == account_id
    }

    /// Unpublished posts are only visible to their author
    pub fn is_visible_to(&self, viewer: Option<AccountId>) -> bool {
        self.published || viewer.is_some_and(|id| self.is_authored_by(id))
    }

    /// Merge the provided fields into the post
    pub fn edit(&mut self, title: Option<String>, published: Option<bool>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(published) = published {
            self.published = published;
        }
        self.updated_at = Utc::now();
    }
}

/// Data needed to insert a new post. Counters always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub published: bool,
    pub author_id: AccountId,
}
