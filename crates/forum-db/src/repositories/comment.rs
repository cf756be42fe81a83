//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{Comment, NewComment};
use forum_core::error::DomainError;
use forum_core::traits::{CommentRepository, RepoResult};
use forum_core::value_objects::{CommentId, PostId};

use crate::models::CommentModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, content, published, author_id, post_id, likes, dislikes, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, content, published, author_id, post_id, likes, dislikes, created_at, updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let post_id = comment.post_id;

        let model = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (content, published, author_id, post_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, published, author_id, post_id, likes, dislikes, created_at, updated_at
            ",
        )
        .bind(&comment.content)
        .bind(comment.published)
        .bind(comment.author_id.into_inner())
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| {
                if constraint.contains("post_id") {
                    DomainError::PostNotFound(post_id)
                } else {
                    DomainError::AuthorNotFound
                }
            })
        })?;

        Ok(Comment::from(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments
            SET content = $2, published = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .bind(comment.published)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(id));
        }

        Ok(())
    }
}
