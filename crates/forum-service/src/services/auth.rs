//! Authentication service
//!
//! Handles signup, login, logout, and resolving a bearer token to an account.
//! Every issued JWT names a row in the token table; logging out deletes that row.

use forum_common::auth::{hash_password, verify_password};
use forum_common::AppError;
use forum_core::entities::NewAccount;
use forum_core::AccountId;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{LoginRequest, SignupRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The account behind a validated access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    /// Id of the token row, needed to log out
    pub jti: Uuid,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and open its first session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<TokenResponse> {
        let password_hash = hash_password(&request.password)?;

        let new_account = NewAccount {
            nick: request.nick,
            name: request.name,
            email: request.email,
        };
        let account = self
            .ctx
            .account_repo()
            .create(&new_account, &password_hash)
            .await?;

        info!(account_id = %account.id, "Account registered");

        self.open_session(account.id).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .account_repo()
            .get_password_hash(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)?;

        if !is_valid {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(account_id = %account.id, "Account logged in");

        self.open_session(account.id).await
    }

    /// Revoke the token a request was authenticated with
    #[instrument(skip(self))]
    pub async fn logout(&self, auth: AuthenticatedAccount) -> ServiceResult<()> {
        self.ctx.token_repo().delete(auth.jti).await?;

        info!(account_id = %auth.account_id, "Account logged out");
        Ok(())
    }

    /// Store a token row and sign a JWT naming it
    async fn open_session(&self, account_id: AccountId) -> ServiceResult<TokenResponse> {
        let jti = Uuid::new_v4();
        self.ctx.token_repo().create(jti, account_id).await?;
        let issued = self.ctx.jwt_service().issue(jti)?;

        Ok(TokenResponse {
            access_token: issued.access_token,
            exp: issued.expires_in,
        })
    }

    /// Resolve a bearer token to the account it was issued to
    ///
    /// # Errors
    /// - `AppError::TokenExpired` for an expired JWT
    /// - `AppError::InvalidToken` for a malformed JWT or a revoked token
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<AuthenticatedAccount> {
        let jti = self.ctx.jwt_service().validate_access_token(token)?;

        let account_id = self
            .ctx
            .token_repo()
            .find_account(jti)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        Ok(AuthenticatedAccount { account_id, jti })
    }
}
