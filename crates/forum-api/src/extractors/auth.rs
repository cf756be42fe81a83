//! Authentication extractor
//!
//! Resolves the `Authorization: Bearer` header to a live token row.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};
use forum_common::AppError;
use forum_core::AccountId;
use forum_service::{AuthService, AuthenticatedAccount};
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub account_id: AccountId,
    /// Token id, revoked on logout
    pub jti: Uuid,
}

impl From<AuthenticatedAccount> for AuthUser {
    fn from(auth: AuthenticatedAccount) -> Self {
        Self {
            account_id: auth.account_id,
            jti: auth.jti,
        }
    }
}

impl From<AuthUser> for AuthenticatedAccount {
    fn from(user: AuthUser) -> Self {
        Self {
            account_id: user.account_id,
            jti: user.jti,
        }
    }
}

fn header_rejection(rejection: &TypedHeaderRejection) -> ApiError {
    if rejection.is_missing() {
        ApiError::App(AppError::MissingAuth)
    } else {
        ApiError::App(AppError::InvalidToken)
    }
}

async fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    AuthService::new(state.service_context())
        .authenticate(token)
        .await
        .map(AuthUser::from)
        .map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            ApiError::from(e)
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| header_rejection(&e))?;

        let app_state = AppState::from_ref(state);
        authenticate(&app_state, bearer.token()).await
    }
}

/// Optional authenticated account
///
/// `None` when no Authorization header is sent; a bad token is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn account_id(&self) -> Option<AccountId> {
        self.0.map(|user| user.account_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let app_state = AppState::from_ref(state);
                let user = authenticate(&app_state, bearer.token()).await?;
                Ok(OptionalAuthUser(Some(user)))
            }
            Err(e) if e.is_missing() => Ok(OptionalAuthUser(None)),
            Err(e) => Err(header_rejection(&e)),
        }
    }
}
