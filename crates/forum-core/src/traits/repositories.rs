//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Account, Comment, LedgerEntry, NewAccount, NewComment, NewPost, Post, ReactionChange,
};
use crate::error::DomainError;
use crate::traits::Reactable;
use crate::value_objects::{AccountId, CommentId, PostId, ReactionCounters};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;

    /// Find account by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// Create a new account, failing with `EmailAlreadyExists` on a duplicate email
    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account>;

    /// Persist profile fields of an existing account
    async fn update(&self, account: &Account) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Token Repository
// ============================================================================

/// Issued access tokens, keyed by the JWT id
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Record a newly issued token
    async fn create(&self, jti: Uuid, account_id: AccountId) -> RepoResult<()>;

    /// Resolve a token id to its owning account, if the token is still live
    async fn find_account(&self, jti: Uuid) -> RepoResult<Option<AccountId>>;

    /// Revoke a token; `SessionNotFound` if no row had that `jti`
    async fn delete(&self, jti: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List posts written by an account, newest first
    async fn find_by_author(&self, author_id: AccountId) -> RepoResult<Vec<Post>>;

    /// Create a new post, failing with `AuthorNotFound` if the author does not exist
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Persist title and published flag
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post together with its comments and ledger entries
    async fn delete(&self, id: PostId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments on a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    /// Create a new comment, failing with `PostNotFound` or `AuthorNotFound`
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Persist content and published flag
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment together with its ledger entries
    async fn delete(&self, id: CommentId) -> RepoResult<()>;
}

// ============================================================================
// Reaction Store
// ============================================================================

/// Persistence port of the reaction engine for one reactable kind
#[async_trait]
pub trait ReactionStore<R: Reactable>: Send + Sync {
    /// Current ledger entry for the `(account, reactable)` pair
    async fn find_entry(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
    ) -> RepoResult<Option<LedgerEntry<R::Id>>>;

    /// Current counters of a reactable, `None` if it does not exist
    async fn find_counters(&self, reactable_id: R::Id) -> RepoResult<Option<ReactionCounters>>;

    /// Apply the ledger mutation and counter delta as one atomic unit.
    ///
    /// Fails with `R::not_found` when the reactable is missing and with
    /// `DomainError::ReactionConflict` when the ledger row no longer matches
    /// what the change was decided against. Nothing is written on failure.
    async fn apply(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
        change: ReactionChange,
    ) -> RepoResult<ReactionCounters>;
}
