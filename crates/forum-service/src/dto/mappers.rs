//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{Account, Comment, Post};
use forum_core::ReactionCounters;

use super::responses::{
    CommentResponse, PostResponse, PostWithCommentsResponse, ProfileResponse,
    ReactionCountersResponse,
};

// ============================================================================
// Account Mappers
// ============================================================================

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            nick: account.nick.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            public_name: account.public_name,
            public_email: account.public_email,
        }
    }
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        Self {
            nick: account.nick,
            name: account.name,
            email: account.email,
            public_name: account.public_name,
            public_email: account.public_email,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            published: post.published,
            author_id: post.author_id,
            likes: post.counters.likes,
            dislikes: post.counters.dislikes,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl PostWithCommentsResponse {
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            post: PostResponse::from(post),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            published: comment.published,
            author_id: comment.author_id,
            post_id: comment.post_id,
            likes: comment.counters.likes,
            dislikes: comment.counters.dislikes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionCounters> for ReactionCountersResponse {
    fn from(counters: ReactionCounters) -> Self {
        Self {
            likes: counters.likes,
            dislikes: counters.dislikes,
        }
    }
}
