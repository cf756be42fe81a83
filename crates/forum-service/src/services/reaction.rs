//! Like/dislike engine
//!
//! `ReactionLedger<R>` keeps a reactable's counters equal to the tallies of
//! its ledger. One engine is instantiated per reactable kind. Every reaction
//! is read, decided and applied as a compare-and-swap against the ledger row;
//! a lost race is re-read and re-decided a bounded number of times.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use forum_common::ReactionConfig;
use forum_core::entities::ReactionChange;
use forum_core::error::DomainError;
use forum_core::traits::{Reactable, ReactionStore};
use forum_core::value_objects::{AccountId, CommentId, PostId, ReactionCounters, Vote};

use crate::dto::ReactionCountersResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

// ============================================================================
// Retry policy
// ============================================================================

/// How often and how patiently a conflicting reaction is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never zero.
    max_attempts: u32,
    /// Backoff before the second attempt, doubled for each further one
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retrying after `attempt` failed, with up to 100% jitter
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(1 << attempt.saturating_sub(1).min(6));
        let jitter_ms = u64::try_from(exp.as_millis()).unwrap_or(u64::MAX);
        let jitter = rand::thread_rng().gen_range(0..=jitter_ms);
        exp + Duration::from_millis(jitter)
    }
}

impl From<ReactionConfig> for RetryPolicy {
    fn from(config: ReactionConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(5))
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Generic reaction engine for one reactable kind
pub struct ReactionLedger<R: Reactable> {
    store: Arc<dyn ReactionStore<R>>,
    policy: RetryPolicy,
}

impl<R: Reactable> Clone for ReactionLedger<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy,
        }
    }
}

impl<R: Reactable> ReactionLedger<R> {
    pub fn new(store: Arc<dyn ReactionStore<R>>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Cast `vote` on a reactable for an account.
    ///
    /// First vote counts it, the same vote again retracts it, the opposite
    /// vote switches it. Returns the counters after the change.
    ///
    /// # Errors
    /// - `R::not_found` if the reactable does not exist
    /// - `DomainError::ReactionConflict` if every attempt lost a race
    #[instrument(skip(self), fields(kind = %R::KIND))]
    pub async fn react(
        &self,
        reactable_id: R::Id,
        account_id: AccountId,
        vote: Vote,
    ) -> Result<ReactionCounters, DomainError> {
        let mut attempt = 1;
        loop {
            match self.attempt(reactable_id, account_id, vote).await {
                Err(DomainError::ReactionConflict) if attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    debug!(attempt, ?delay, "Reaction conflict, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(DomainError::ReactionConflict) => {
                    warn!(attempts = attempt, "Reaction retries exhausted");
                    return Err(DomainError::ReactionConflict);
                }
                result => return result,
            }
        }
    }

    /// One read-decide-apply round
    async fn attempt(
        &self,
        reactable_id: R::Id,
        account_id: AccountId,
        vote: Vote,
    ) -> Result<ReactionCounters, DomainError> {
        let existing = self
            .store
            .find_entry(account_id, reactable_id)
            .await?
            .map(|entry| entry.vote);

        let change = ReactionChange::decide(existing, vote);
        self.store.apply(account_id, reactable_id, change).await
    }
}

// ============================================================================
// Service
// ============================================================================

/// Reaction service for the HTTP layer
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like or dislike a post
    #[instrument(skip(self))]
    pub async fn react_to_post(
        &self,
        post_id: PostId,
        account_id: AccountId,
        vote: Vote,
    ) -> ServiceResult<ReactionCountersResponse> {
        let counters = self.ctx.post_ledger().react(post_id, account_id, vote).await?;

        info!(
            post_id = %post_id,
            account_id = %account_id,
            vote = %vote,
            likes = counters.likes,
            dislikes = counters.dislikes,
            "Post reaction applied"
        );

        Ok(ReactionCountersResponse::from(counters))
    }

    /// Like or dislike a comment
    #[instrument(skip(self))]
    pub async fn react_to_comment(
        &self,
        comment_id: CommentId,
        account_id: AccountId,
        vote: Vote,
    ) -> ServiceResult<ReactionCountersResponse> {
        let counters = self
            .ctx
            .comment_ledger()
            .react(comment_id, account_id, vote)
            .await?;

        info!(
            comment_id = %comment_id,
            account_id = %account_id,
            vote = %vote,
            likes = counters.likes,
            dislikes = counters.dislikes,
            "Comment reaction applied"
        );

        Ok(ReactionCountersResponse::from(counters))
    }
}
