//! Account service
//!
//! Profile reads and updates, and the per-account post listing.

use forum_core::{AccountId, DomainError};
use tracing::{info, instrument};

use crate::dto::{PostResponse, ProfileResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the profile of an account
    #[instrument(skip(self))]
    pub async fn get_profile(&self, account_id: AccountId) -> ServiceResult<ProfileResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))?;

        Ok(ProfileResponse::from(account))
    }

    /// Merge the provided fields into an account's profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        account_id: AccountId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))?;

        if let Some(nick) = request.nick {
            account.set_nick(nick);
        }
        if let Some(name) = request.name {
            account.set_name(name);
        }
        if let Some(email) = request.email {
            account.set_email(email);
        }
        account.set_visibility(request.public_name, request.public_email);

        self.ctx.account_repo().update(&account).await?;

        info!(account_id = %account_id, "Profile updated");

        Ok(ProfileResponse::from(account))
    }

    /// Posts written by an account, newest first.
    ///
    /// Drafts are only listed when the viewer is their author.
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        account_id: AccountId,
        viewer: Option<AccountId>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if self.ctx.account_repo().find_by_id(account_id).await?.is_none() {
            return Err(DomainError::AccountNotFound(account_id).into());
        }

        let posts = self.ctx.post_repo().find_by_author(account_id).await?;

        Ok(posts
            .into_iter()
            .filter(|post| post.is_visible_to(viewer))
            .map(PostResponse::from)
            .collect())
    }
}
