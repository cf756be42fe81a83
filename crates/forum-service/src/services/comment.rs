//! Comment service

use forum_core::entities::{Comment, NewComment};
use forum_core::{AccountId, CommentId, DomainError};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post
    #[instrument(skip(self, request), fields(post_id = %request.post_id))]
    pub async fn create_comment(
        &self,
        author_id: AccountId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let new_comment = NewComment {
            content: request.content,
            published: request.published,
            author_id,
            post_id: request.post_id,
        };
        let comment = self.ctx.comment_repo().create(&new_comment).await?;

        info!(comment_id = %comment.id, post_id = %comment.post_id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: CommentId) -> ServiceResult<CommentResponse> {
        self.find_comment(comment_id).await.map(CommentResponse::from)
    }

    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: CommentId,
        caller_id: AccountId,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.find_owned_comment(comment_id, caller_id).await?;

        comment.edit(request.content, request.published);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment_id, "Comment updated");

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: CommentId,
        caller_id: AccountId,
    ) -> ServiceResult<()> {
        self.find_owned_comment(comment_id, caller_id).await?;
        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    async fn find_comment(&self, comment_id: CommentId) -> ServiceResult<Comment> {
        Ok(self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?)
    }

    async fn find_owned_comment(
        &self,
        comment_id: CommentId,
        caller_id: AccountId,
    ) -> ServiceResult<Comment> {
        let comment = self.find_comment(comment_id).await?;
        if !comment.is_authored_by(caller_id) {
            return Err(DomainError::NotResourceOwner.into());
        }
        Ok(comment)
    }
}
