//! Account handlers
//!
//! Signup, login, logout, profile, and per-account post listing.

use axum::{extract::State, Json};
use forum_core::AccountId;
use forum_service::dto::{
    LoginRequest, PostResponse, ProfileResponse, SignupRequest, TokenResponse,
    UpdateProfileRequest,
};
use forum_service::{AccountService, AuthService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account and log it in
///
/// POST /accounts/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let token = service.signup(request).await?;
    Ok(Created(token))
}

/// Exchange credentials for an access token
///
/// POST /accounts/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let token = service.login(request).await?;
    Ok(Json(token))
}

/// Revoke the token used for this request
///
/// DELETE /accounts/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.logout(auth.into()).await?;
    Ok(NoContent)
}

/// GET /accounts/me/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = AccountService::new(state.service_context());
    let profile = service.get_profile(auth.account_id).await?;
    Ok(Json(profile))
}

/// PUT /accounts/me/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = AccountService::new(state.service_context());
    let profile = service.update_profile(auth.account_id, request).await?;
    Ok(Json(profile))
}

/// Posts of an account, drafts included only for their author
///
/// GET /accounts/{account_id}/posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(account_id): IdPath<AccountId>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = AccountService::new(state.service_context());
    let posts = service.list_posts(account_id, viewer.account_id()).await?;
    Ok(Json(posts))
}
