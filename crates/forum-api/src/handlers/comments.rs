//! Comment handlers

use axum::{extract::State, Json};
use forum_core::{CommentId, Vote};
use forum_service::dto::{
    CommentResponse, CreateCommentRequest, ReactionCountersResponse, UpdateCommentRequest,
};
use forum_service::{CommentService, ReactionService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(auth.account_id, request).await?;
    Ok(Created(comment))
}

/// GET /comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service.get_comment(comment_id).await?;
    Ok(Json(comment))
}

/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .update_comment(comment_id, auth.account_id, request)
        .await?;
    Ok(Json(comment))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, auth.account_id).await?;
    Ok(NoContent)
}

/// PATCH /comments/{comment_id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<ReactionCountersResponse>> {
    let service = ReactionService::new(state.service_context());
    let counters = service
        .react_to_comment(comment_id, auth.account_id, Vote::Like)
        .await?;
    Ok(Json(counters))
}

/// PATCH /comments/{comment_id}/dislike
pub async fn dislike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<ReactionCountersResponse>> {
    let service = ReactionService::new(state.service_context());
    let counters = service
        .react_to_comment(comment_id, auth.account_id, Vote::Dislike)
        .await?;
    Ok(Json(counters))
}
