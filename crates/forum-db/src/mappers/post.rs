//! Post model -> entity mapper

use forum_core::entities::Post;
use forum_core::value_objects::{AccountId, PostId, ReactionCounters};

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            title: model.title,
            published: model.published,
            author_id: AccountId::new(model.author_id),
            counters: ReactionCounters::new(model.likes, model.dislikes),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
