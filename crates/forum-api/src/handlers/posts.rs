//! Post handlers
//!
//! Post CRUD plus the like/dislike endpoints.

use axum::{extract::State, Json};
use forum_core::{PostId, Vote};
use forum_service::dto::{
    CreatePostRequest, PostResponse, PostWithCommentsResponse, ReactionCountersResponse,
    UpdatePostRequest,
};
use forum_service::{PostService, ReactionService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(auth.account_id, request).await?;
    Ok(Created(post))
}

/// Get a post with its comments
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<PostWithCommentsResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.get_post(post_id).await?;
    Ok(Json(post))
}

/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service.update_post(post_id, auth.account_id, request).await?;
    Ok(Json(post))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.account_id).await?;
    Ok(NoContent)
}

async fn react(
    state: &AppState,
    auth: AuthUser,
    post_id: PostId,
    vote: Vote,
) -> ApiResult<Json<ReactionCountersResponse>> {
    let service = ReactionService::new(state.service_context());
    let counters = service.react_to_post(post_id, auth.account_id, vote).await?;
    Ok(Json(counters))
}

/// Like a post, or take the like back
///
/// PATCH /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<ReactionCountersResponse>> {
    react(&state, auth, post_id, Vote::Like).await
}

/// Dislike a post, or take the dislike back
///
/// PATCH /posts/{post_id}/dislike
pub async fn dislike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<ReactionCountersResponse>> {
    react(&state, auth, post_id, Vote::Dislike).await
}
