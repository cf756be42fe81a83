//! In-memory repositories for service tests
//!
//! All fakes share one `Tables` value behind a `tokio::sync::Mutex`, so
//! foreign keys and cascades behave like the Postgres schema.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use uuid::Uuid;

use forum_common::auth::{hash_password, JwtService};
use forum_core::entities::{
    Account, Comment, LedgerEntry, LedgerOp, NewAccount, NewComment, NewPost, Post, ReactionChange,
};
use forum_core::error::DomainError;
use forum_core::traits::{
    AccountRepository, CommentRepository, PostRepository, Reactable, ReactableKind,
    ReactionStore, RepoResult, TokenRepository,
};
use forum_core::value_objects::{AccountId, CommentId, PostId, ReactionCounters, Vote};

use crate::services::{RetryPolicy, ServiceContext, ServiceContextBuilder};

pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";

type Ledger = HashMap<(AccountId, i64), Vote>;

#[derive(Default)]
pub(crate) struct Tables {
    accounts: HashMap<AccountId, (Account, String)>,
    tokens: HashMap<Uuid, AccountId>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    post_ledger: Ledger,
    comment_ledger: Ledger,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn counters_mut(&mut self, kind: ReactableKind, id: i64) -> Option<&mut ReactionCounters> {
        match kind {
            ReactableKind::Post => self.posts.get_mut(&PostId::new(id)).map(|p| &mut p.counters),
            ReactableKind::Comment => self
                .comments
                .get_mut(&CommentId::new(id))
                .map(|c| &mut c.counters),
        }
    }

    fn ledger(&self, kind: ReactableKind) -> &Ledger {
        match kind {
            ReactableKind::Post => &self.post_ledger,
            ReactableKind::Comment => &self.comment_ledger,
        }
    }

    fn ledger_mut(&mut self, kind: ReactableKind) -> &mut Ledger {
        match kind {
            ReactableKind::Post => &mut self.post_ledger,
            ReactableKind::Comment => &mut self.comment_ledger,
        }
    }

    fn drop_comment(&mut self, id: CommentId) {
        self.comments.remove(&id);
        self.comment_ledger.retain(|(_, c), _| *c != id.into_inner());
    }

    fn insert_post(&mut self, author_id: AccountId, published: bool) -> Post {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(self.next_id()),
            title: "Seeded post".to_string(),
            published,
            author_id,
            counters: ReactionCounters::default(),
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    fn insert_comment(&mut self, author_id: AccountId, post_id: PostId) -> Comment {
        let now = Utc::now();
        let comment = Comment {
            id: CommentId::new(self.next_id()),
            content: "Seeded comment".to_string(),
            published: true,
            author_id,
            post_id,
            counters: ReactionCounters::default(),
            created_at: now,
            updated_at: now,
        };
        self.comments.insert(comment.id, comment.clone());
        comment
    }
}

pub(crate) type SharedTables = Arc<Mutex<Tables>>;

// ============================================================================
// Repositories
// ============================================================================

pub(crate) struct InMemoryAccounts(SharedTables);

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        Ok(self.0.lock().await.accounts.get(&id).map(|(a, _)| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let tables = self.0.lock().await;
        Ok(tables
            .accounts
            .values()
            .find(|(a, _)| a.email == email)
            .map(|(a, _)| a.clone()))
    }

    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account> {
        let mut tables = self.0.lock().await;
        if tables.accounts.values().any(|(a, _)| a.email == account.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let created = Account {
            id: AccountId::new(tables.next_id()),
            nick: account.nick.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            public_name: false,
            public_email: false,
            created_at: now,
            updated_at: now,
        };
        tables
            .accounts
            .insert(created.id, (created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update(&self, account: &Account) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        if tables
            .accounts
            .values()
            .any(|(a, _)| a.email == account.email && a.id != account.id)
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        let (stored, _) = tables
            .accounts
            .get_mut(&account.id)
            .ok_or(DomainError::AccountNotFound(account.id))?;
        *stored = account.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        Ok(self.0.lock().await.accounts.get(&id).map(|(_, h)| h.clone()))
    }
}

pub(crate) struct InMemoryTokens(SharedTables);

#[async_trait]
impl TokenRepository for InMemoryTokens {
    async fn create(&self, jti: Uuid, account_id: AccountId) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        if !tables.accounts.contains_key(&account_id) {
            return Err(DomainError::AccountNotFound(account_id));
        }
        tables.tokens.insert(jti, account_id);
        Ok(())
    }

    async fn find_account(&self, jti: Uuid) -> RepoResult<Option<AccountId>> {
        Ok(self.0.lock().await.tokens.get(&jti).copied())
    }

    async fn delete(&self, jti: Uuid) -> RepoResult<()> {
        self.0
            .lock()
            .await
            .tokens
            .remove(&jti)
            .map(|_| ())
            .ok_or(DomainError::SessionNotFound)
    }
}

pub(crate) struct InMemoryPosts(SharedTables);

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.0.lock().await.posts.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: AccountId) -> RepoResult<Vec<Post>> {
        let tables = self.0.lock().await;
        Ok(tables
            .posts
            .values()
            .rev()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut tables = self.0.lock().await;
        if !tables.accounts.contains_key(&post.author_id) {
            return Err(DomainError::AuthorNotFound);
        }
        let mut created = tables.insert_post(post.author_id, post.published);
        created.title.clone_from(&post.title);
        tables.posts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        let stored = tables
            .posts
            .get_mut(&post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        stored.title.clone_from(&post.title);
        stored.published = post.published;
        stored.updated_at = post.updated_at;
        Ok(())
    }

    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        tables.posts.remove(&id).ok_or(DomainError::PostNotFound(id))?;
        tables.post_ledger.retain(|(_, p), _| *p != id.into_inner());

        let orphaned: Vec<CommentId> = tables
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in orphaned {
            tables.drop_comment(comment_id);
        }
        Ok(())
    }
}

pub(crate) struct InMemoryComments(SharedTables);

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.0.lock().await.comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let tables = self.0.lock().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut tables = self.0.lock().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        if !tables.accounts.contains_key(&comment.author_id) {
            return Err(DomainError::AuthorNotFound);
        }
        let mut created = tables.insert_comment(comment.author_id, comment.post_id);
        created.content.clone_from(&comment.content);
        created.published = comment.published;
        tables.comments.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        let stored = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.content.clone_from(&comment.content);
        stored.published = comment.published;
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        let mut tables = self.0.lock().await;
        if !tables.comments.contains_key(&id) {
            return Err(DomainError::CommentNotFound(id));
        }
        tables.drop_comment(id);
        Ok(())
    }
}

// ============================================================================
// Reaction store
// ============================================================================

/// Ledger and counters for one reactable kind. Accounts are not checked.
pub(crate) struct InMemoryReactionStore<R> {
    tables: SharedTables,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Reactable> InMemoryReactionStore<R> {
    pub(crate) fn new(tables: SharedTables) -> Self {
        Self {
            tables,
            _kind: PhantomData,
        }
    }

    /// Standalone store holding one reactable with the given id and zero counters
    pub(crate) fn with_reactable(id: i64) -> Self {
        let mut tables = Tables {
            next_id: id - 1,
            ..Tables::default()
        };
        match R::KIND {
            ReactableKind::Post => {
                tables.insert_post(AccountId::new(0), true);
            }
            ReactableKind::Comment => {
                tables.insert_comment(AccountId::new(0), PostId::new(0));
            }
        }
        Self::new(Arc::new(Mutex::new(tables)))
    }

    pub(crate) async fn counters(&self, id: i64) -> ReactionCounters {
        self.tables
            .lock()
            .await
            .counters_mut(R::KIND, id)
            .map(|c| *c)
            .unwrap_or_default()
    }

    pub(crate) async fn entry(&self, account_id: AccountId, id: i64) -> Option<Vote> {
        self.tables.lock().await.ledger(R::KIND).get(&(account_id, id)).copied()
    }

    /// All votes on a reactable, ordered by account
    pub(crate) async fn entries_for(&self, id: i64) -> Vec<(AccountId, Vote)> {
        let tables = self.tables.lock().await;
        let mut entries: Vec<_> = tables
            .ledger(R::KIND)
            .iter()
            .filter(|((_, r), _)| *r == id)
            .map(|((a, _), v)| (*a, *v))
            .collect();
        entries.sort_by_key(|(a, _)| *a);
        entries
    }
}

#[async_trait]
impl<R: Reactable> ReactionStore<R> for InMemoryReactionStore<R> {
    async fn find_entry(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
    ) -> RepoResult<Option<LedgerEntry<R::Id>>> {
        let vote = self.entry(account_id, reactable_id.into()).await;
        Ok(vote.map(|vote| LedgerEntry::new(account_id, reactable_id, vote)))
    }

    async fn find_counters(&self, reactable_id: R::Id) -> RepoResult<Option<ReactionCounters>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.counters_mut(R::KIND, reactable_id.into()).map(|c| *c))
    }

    async fn apply(
        &self,
        account_id: AccountId,
        reactable_id: R::Id,
        change: ReactionChange,
    ) -> RepoResult<ReactionCounters> {
        let mut tables = self.tables.lock().await;
        let id: i64 = reactable_id.into();

        let current = tables
            .counters_mut(R::KIND, id)
            .map(|c| *c)
            .ok_or_else(|| R::not_found(reactable_id))?;

        let key = (account_id, id);
        if tables.ledger(R::KIND).get(&key).copied() != change.op.expected_vote() {
            return Err(DomainError::ReactionConflict);
        }

        let updated = current
            .apply(change.delta)
            .ok_or_else(|| DomainError::DatabaseError("counter check violated".to_string()))?;

        match change.op {
            LedgerOp::Insert(vote) | LedgerOp::Update { to: vote, .. } => {
                tables.ledger_mut(R::KIND).insert(key, vote);
            }
            LedgerOp::Delete(_) => {
                tables.ledger_mut(R::KIND).remove(&key);
            }
        }
        if let Some(counters) = tables.counters_mut(R::KIND, id) {
            *counters = updated;
        }

        Ok(updated)
    }
}

// ============================================================================
// Context
// ============================================================================

/// A service context wired to in-memory repositories
pub(crate) struct TestContext {
    pub ctx: ServiceContext,
    pub tables: SharedTables,
}

pub(crate) async fn test_context() -> TestContext {
    let tables: SharedTables = Arc::default();

    // Never connects; services under test only touch the fakes
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/forum_unused")
        .expect("lazy pool");

    let ctx = ServiceContextBuilder::new()
        .pool(pool)
        .account_repo(Arc::new(InMemoryAccounts(Arc::clone(&tables))))
        .token_repo(Arc::new(InMemoryTokens(Arc::clone(&tables))))
        .post_repo(Arc::new(InMemoryPosts(Arc::clone(&tables))))
        .comment_repo(Arc::new(InMemoryComments(Arc::clone(&tables))))
        .post_reactions(Arc::new(InMemoryReactionStore::<Post>::new(Arc::clone(&tables))))
        .comment_reactions(Arc::new(InMemoryReactionStore::<Comment>::new(Arc::clone(
            &tables,
        ))))
        .jwt_service(Arc::new(JwtService::new("test-secret-key-for-services", 3600)))
        .retry_policy(RetryPolicy::new(3, std::time::Duration::from_millis(1)))
        .build()
        .expect("complete context");

    TestContext { ctx, tables }
}

impl TestContext {
    /// Number of live token rows
    pub async fn session_count(&self) -> usize {
        self.tables.lock().await.tokens.len()
    }

    /// Register an account whose password is `TEST_PASSWORD`
    pub async fn seed_account(&self, email: &str) -> Account {
        let hash = hash_password(TEST_PASSWORD).expect("hash");
        let new = NewAccount {
            nick: "tester".to_string(),
            name: "Test Account".to_string(),
            email: email.to_string(),
        };
        self.ctx.account_repo().create(&new, &hash).await.expect("seed account")
    }

    /// Insert a post without checking that its author exists
    pub async fn seed_post(&self, author_id: AccountId, published: bool) -> Post {
        self.tables.lock().await.insert_post(author_id, published)
    }

    /// Insert a comment without checking its author or post
    pub async fn seed_comment(&self, author_id: AccountId, post_id: PostId) -> Comment {
        self.tables.lock().await.insert_comment(author_id, post_id)
    }
}
