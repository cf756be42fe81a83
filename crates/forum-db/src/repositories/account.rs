//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{Account, NewAccount};
use forum_core::error::DomainError;
use forum_core::traits::{AccountRepository, RepoResult};
use forum_core::value_objects::AccountId;

use crate::models::AccountModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, nick, name, email, public_name, public_email, created_at, updated_at
            FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Account::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, nick, name, email, public_name, public_email, created_at, updated_at
            FROM accounts
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Account::from))
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account> {
        let model = sqlx::query_as::<_, AccountModel>(
            r"
            INSERT INTO accounts (nick, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nick, name, email, public_name, public_email, created_at, updated_at
            ",
        )
        .bind(&account.nick)
        .bind(&account.name)
        .bind(&account.email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(Account::from(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, account: &Account) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET nick = $2, name = $3, email = $4, public_name = $5, public_email = $6,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(account.id.into_inner())
        .bind(&account.nick)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.public_name)
        .bind(account.public_email)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(account.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM accounts WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
