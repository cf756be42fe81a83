//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{accounts, comments, health, posts};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(post_routes())
        .merge(comment_routes())
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/signup", post(accounts::signup))
        .route("/accounts/login", post(accounts::login))
        .route("/accounts/logout", delete(accounts::logout))
        .route(
            "/accounts/me/profile",
            get(accounts::get_profile).put(accounts::update_profile),
        )
        .route("/accounts/:account_id/posts", get(accounts::list_posts))
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/like", patch(posts::like_post))
        .route("/posts/:post_id/dislike", patch(posts::dislike_post))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/:comment_id",
            get(comments::get_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/comments/:comment_id/like", patch(comments::like_comment))
        .route("/comments/:comment_id/dislike", patch(comments::dislike_comment))
}
