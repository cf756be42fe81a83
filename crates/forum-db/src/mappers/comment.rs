//! Comment model -> entity mapper

use forum_core::entities::Comment;
use forum_core::value_objects::{AccountId, CommentId, PostId, ReactionCounters};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            content: model.content,
            published: model.published,
            author_id: AccountId::new(model.author_id),
            post_id: PostId::new(model.post_id),
            counters: ReactionCounters::new(model.likes, model.dislikes),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
