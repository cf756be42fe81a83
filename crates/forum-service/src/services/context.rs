//! Service context - dependency container for services
//!
//! Holds the repositories, one reaction engine per reactable kind, and the JWT service.

use std::sync::Arc;

use forum_common::auth::JwtService;
use forum_common::ReactionConfig;
use forum_core::entities::{Comment, Post};
use forum_core::traits::{
    AccountRepository, CommentRepository, PostRepository, ReactionStore, TokenRepository,
};
use forum_db::PgPool;

use super::error::{ServiceError, ServiceResult};
use super::reaction::{ReactionLedger, RetryPolicy};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, used for readiness checks
    pool: PgPool,

    // Repositories
    account_repo: Arc<dyn AccountRepository>,
    token_repo: Arc<dyn TokenRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Reaction engines
    post_ledger: ReactionLedger<Post>,
    comment_ledger: ReactionLedger<Comment>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        account_repo: Arc<dyn AccountRepository>,
        token_repo: Arc<dyn TokenRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        post_reactions: Arc<dyn ReactionStore<Post>>,
        comment_reactions: Arc<dyn ReactionStore<Comment>>,
        jwt_service: Arc<JwtService>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            pool,
            account_repo,
            token_repo,
            post_repo,
            comment_repo,
            post_ledger: ReactionLedger::new(post_reactions, retry_policy),
            comment_ledger: ReactionLedger::new(comment_reactions, retry_policy),
            jwt_service,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    pub fn token_repo(&self) -> &dyn TokenRepository {
        self.token_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Reaction engines ===

    /// Like/dislike engine for posts
    pub fn post_ledger(&self) -> &ReactionLedger<Post> {
        &self.post_ledger
    }

    /// Like/dislike engine for comments
    pub fn comment_ledger(&self) -> &ReactionLedger<Comment> {
        &self.comment_ledger
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("retry_policy", &self.post_ledger.policy())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    token_repo: Option<Arc<dyn TokenRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    post_reactions: Option<Arc<dyn ReactionStore<Post>>>,
    comment_reactions: Option<Arc<dyn ReactionStore<Comment>>>,
    jwt_service: Option<Arc<JwtService>>,
    retry_policy: Option<RetryPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn TokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn post_reactions(mut self, store: Arc<dyn ReactionStore<Post>>) -> Self {
        self.post_reactions = Some(store);
        self
    }

    pub fn comment_reactions(mut self, store: Arc<dyn ReactionStore<Comment>>) -> Self {
        self.comment_reactions = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Retry behavior of both reaction engines, defaults to `ReactionConfig::default()`
    pub fn reaction_config(mut self, config: ReactionConfig) -> Self {
        self.retry_policy = Some(RetryPolicy::from(config));
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::MissingDependency("pool"))?,
            self.account_repo.ok_or_else(|| ServiceError::MissingDependency("account_repo"))?,
            self.token_repo.ok_or_else(|| ServiceError::MissingDependency("token_repo"))?,
            self.post_repo.ok_or_else(|| ServiceError::MissingDependency("post_repo"))?,
            self.comment_repo.ok_or_else(|| ServiceError::MissingDependency("comment_repo"))?,
            self.post_reactions.ok_or_else(|| ServiceError::MissingDependency("post_reactions"))?,
            self.comment_reactions
                .ok_or_else(|| ServiceError::MissingDependency("comment_reactions"))?,
            self.jwt_service.ok_or_else(|| ServiceError::MissingDependency("jwt_service"))?,
            self.retry_policy
                .unwrap_or_else(|| RetryPolicy::from(ReactionConfig::default())),
        ))
    }
}
