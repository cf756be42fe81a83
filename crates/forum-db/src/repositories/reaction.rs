//! PostgreSQL implementation of ReactionStore
//!
//! Each reactable kind has its own counter table and ledger table. A single
//! generic store serves both; the kind picks the tables.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use forum_core::entities::{LedgerEntry, LedgerOp, ReactionChange};
use forum_core::error::DomainError;
use forum_core::traits::{Reactable, ReactableKind, ReactionStore, RepoResult};
use forum_core::value_objects::{AccountId, ReactionCounters};

use crate::models::{CountersModel, LedgerEntryModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// Table layout backing one reactable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LedgerTables {
    /// Table holding the `likes` / `dislikes` counters
    counters: &'static str,
    /// Ledger table, primary key `(account_id, <key>)`
    ledger: &'static str,
    /// Ledger column referencing the counter table
    key: &'static str,
}

impl LedgerTables {
    const fn for_kind(kind: ReactableKind) -> Self {
        match kind {
            ReactableKind::Post => Self {
                counters: "posts",
                ledger: "post_reactions",
                key: "post_id",
            },
            ReactableKind::Comment => Self {
                counters: "comments",
                ledger: "comment_reactions",
                key: "comment_id",
            },
        }
    }
}

/// SQL statements for one kind, rendered once at construction
#[derive(Debug, Clone)]
struct LedgerQueries {
    find_entry: String,
    find_counters: String,
    insert: String,
    switch: String,
    retract: String,
    bump_counters: String,
}

impl LedgerQueries {
    fn new(LedgerTables { counters, ledger, key }: LedgerTables) -> Self {
        Self {
            find_entry: format!(
                "SELECT account_id, {key} AS reactable_id, vote FROM {ledger} \
                 WHERE account_id = $1 AND {key} = $2"
            ),
            find_counters: format!("SELECT likes, dislikes FROM {counters} WHERE id = $1"),
            insert: format!("INSERT INTO {ledger} (account_id, {key}, vote) VALUES ($1, $2, $3)"),
            switch: format!(
                "UPDATE {ledger} SET vote = $3, updated_at = NOW() \
                 WHERE account_id = $1 AND {key} = $2 AND vote = $4"
            ),
            retract: format!(
                "DELETE FROM {ledger} WHERE account_id = $1 AND {key} = $2 AND vote = $3"
            ),
            bump_counters: format!(
                "UPDATE {counters} SET likes = likes + $2, dislikes = dislikes + $3 \
                 WHERE id = $1 RETURNING likes, dislikes"
            ),
        }
    }
}

/// PostgreSQL implementation of ReactionStore for one reactable kind
pub struct PgReactionStore<R> {
    pool: PgPool,
    queries: LedgerQueries,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Reactable> PgReactionStore<R> {
    /// Create a new PgReactionStore
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            queries: LedgerQueries::new(LedgerTables::for_kind(R::KIND)),
            _kind: PhantomData,
        }
    }

    /// Guarded ledger write. Returns the number of rows it touched.
    async fn write_ledger(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account_id: AccountId,
        reactable_id: R::Id,
        op: LedgerOp,
    ) -> RepoResult<u64> {
        let account = account_id.into_inner();
        let id: i64 = reactable_id.into();

        let result = match op {
            LedgerOp::Insert(vote) => sqlx::query(&self.queries.insert)
                .bind(account)
                .bind(id)
                .bind(vote.as_str())
                .execute(&mut **tx)
                .await
                .map_err(|e| insert_error::<R>(e, account_id, reactable_id))?,
            LedgerOp::Update { from, to } => sqlx::query(&self.queries.switch)
                .bind(account)
                .bind(id)
                .bind(to.as_str())
                .bind(from.as_str())
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?,
            LedgerOp::Delete(vote) => sqlx::query(&self.queries.retract)
                .bind(account)
                .bind(id)
                .bind(vote.as_str())
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?,
        };

        Ok(result.rows_affected())
    }
}

impl<R> Clone for PgReactionStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            queries: self.queries.clone(),
            _kind: PhantomData,
        }
    }
}

/// A failed first vote is either a missing row behind a foreign key or a lost insert race
fn insert_error<R: Reactable>(
    e: sqlx::Error,
    account_id: AccountId,
    reactable_id: R::Id,
) -> DomainError {
    let is_fk = e
        .as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation());

    if is_fk {
        map_foreign_key_violation(e, |constraint| {
            if constraint.contains("account_id") {
                DomainError::AccountNotFound(account_id)
            } else {
                R::not_found(reactable_id)
            }
        })
    } else {
        map_unique_violation(e, || DomainError::ReactionConflict)
    }
}

#[async_trait]
impl<R: Reactable> ReactionStore<R> for PgReactionStore<R> {
    #[instrument(skip(self), fields(kind = %R::KIND))]
    async fn find_entry(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
    ) -> RepoResult<Option<LedgerEntry<R::Id>>> {
        let id: i64 = reactable_id.into();
        let result = sqlx::query_as::<_, LedgerEntryModel>(&self.queries.find_entry)
            .bind(account_id.into_inner())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(LedgerEntryModel::into_entry).transpose()
    }

    #[instrument(skip(self), fields(kind = %R::KIND))]
    async fn find_counters(&self, reactable_id: R::Id) -> RepoResult<Option<ReactionCounters>> {
        let id: i64 = reactable_id.into();
        let result = sqlx::query_as::<_, CountersModel>(&self.queries.find_counters)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ReactionCounters::from))
    }

    #[instrument(skip(self), fields(kind = %R::KIND))]
    async fn apply(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
        change: ReactionChange,
    ) -> RepoResult<ReactionCounters> {
        // Dropping the transaction on any early return rolls it back
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let written = self
            .write_ledger(&mut tx, account_id, reactable_id, change.op)
            .await?;
        if written == 0 {
            debug!(op = ?change.op, "Ledger row changed underneath");
            return Err(DomainError::ReactionConflict);
        }

        let id: i64 = reactable_id.into();
        let counters = sqlx::query_as::<_, CountersModel>(&self.queries.bump_counters)
            .bind(id)
            .bind(change.delta.likes)
            .bind(change.delta.dislikes)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| R::not_found(reactable_id))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ReactionCounters::from(counters))
    }
}
