//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{NewPost, Post};
use forum_core::error::DomainError;
use forum_core::traits::{PostRepository, RepoResult};
use forum_core::value_objects::{AccountId, PostId};

use crate::models::PostModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, title, published, author_id, likes, dislikes, created_at, updated_at
            FROM posts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: AccountId) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, title, published, author_id, likes, dislikes, created_at, updated_at
            FROM posts
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(author_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let model = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (title, published, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, published, author_id, likes, dislikes, created_at, updated_at
            ",
        )
        .bind(&post.title)
        .bind(post.published)
        .bind(post.author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| DomainError::AuthorNotFound))?;

        Ok(Post::from(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = $2, published = $3, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(post.published)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<()> {
        // Comments and both ledgers go with it via ON DELETE CASCADE
        let result = sqlx::query(
            r"
            DELETE FROM posts WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        Ok(())
    }
}
