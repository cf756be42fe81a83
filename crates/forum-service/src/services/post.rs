//! Post service
//!
//! Handles post creation, retrieval with comments, and author-only edits.

use forum_core::entities::{NewPost, Post};
use forum_core::{AccountId, DomainError, PostId};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostResponse, PostWithCommentsResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post owned by `author_id`
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: AccountId,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let new_post = NewPost {
            title: request.title,
            published: request.published,
            author_id,
        };
        let post = self.ctx.post_repo().create(&new_post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        Ok(PostResponse::from(post))
    }

    /// Get a post with its comments
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: PostId) -> ServiceResult<PostWithCommentsResponse> {
        let post = self.find_post(post_id).await?;
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        Ok(PostWithCommentsResponse::new(post, comments))
    }

    /// Update title and/or published flag
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: PostId,
        caller_id: AccountId,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find_owned_post(post_id, caller_id).await?;

        post.edit(request.title, request.published);
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post updated");

        Ok(PostResponse::from(post))
    }

    /// Delete a post, its comments, and every vote on either
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: PostId, caller_id: AccountId) -> ServiceResult<()> {
        self.find_owned_post(post_id, caller_id).await?;
        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    async fn find_post(&self, post_id: PostId) -> ServiceResult<Post> {
        Ok(self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?)
    }

    async fn find_owned_post(&self, post_id: PostId, caller_id: AccountId) -> ServiceResult<Post> {
        let post = self.find_post(post_id).await?;
        if !post.is_authored_by(caller_id) {
            return Err(DomainError::NotResourceOwner.into());
        }
        Ok(post)
    }
}
