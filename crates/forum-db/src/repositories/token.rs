//! PostgreSQL implementation of TokenRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, TokenRepository};
use forum_core::value_objects::AccountId;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of TokenRepository
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PgTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    #[instrument(skip(self))]
    async fn create(&self, jti: Uuid, account_id: AccountId) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO tokens (jti, account_id) VALUES ($1, $2)
            ",
        )
        .bind(jti)
        .bind(account_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| DomainError::AccountNotFound(account_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_account(&self, jti: Uuid) -> RepoResult<Option<AccountId>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT account_id FROM tokens WHERE jti = $1
            ",
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AccountId::new))
    }

    #[instrument(skip(self))]
    async fn delete(&self, jti: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM tokens WHERE jti = $1
            ",
        )
        .bind(jti)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SessionNotFound);
        }

        Ok(())
    }
}
