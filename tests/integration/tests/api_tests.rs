//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and the environment
//! variables DATABASE_URL and JWT_SECRET. Migrations run on startup.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_signup_issues_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/v1/accounts/signup", &request).await.unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!token.access_token.is_empty());
    assert!(token.exp > 0);

    let response = server
        .get_auth("/api/v1/accounts/me/profile", &token.access_token)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.email, request.email);
    assert_eq!(profile.nick, request.nick);
    assert!(!profile.public_name);
    assert!(!profile.public_email);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();
    server.post("/api/v1/accounts/signup", &request).await.unwrap();

    let response = server.post("/api/v1/accounts/signup", &request).await.unwrap();
    let code = assert_error(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/v1/accounts/signup", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let response = server
        .get_auth("/api/v1/accounts/me/profile", &session.token)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.email, session.signup.email);

    let response = server
        .delete_auth("/api/v1/accounts/logout", &session.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The token still verifies but its row is gone
    let response = server
        .get_auth("/api/v1/accounts/me/profile", &session.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_reports_lifetime() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/v1/accounts/signup", &signup).await.unwrap();

    let response = server
        .post("/api/v1/accounts/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!token.access_token.is_empty());
    assert!(token.exp > 0);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/v1/accounts/signup", &signup).await.unwrap();

    let wrong_password = LoginRequest {
        email: signup.email.clone(),
        password: "wrong-password".to_string(),
    };
    let response = server.post("/api/v1/accounts/login", &wrong_password).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");

    let unknown = LoginRequest {
        email: format!("nobody{}@example.com", unique_suffix()),
        password: "whatever".to_string(),
    };
    let response = server.post("/api/v1/accounts/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let body = json!({ "nick": "renamed", "publicEmail": true });
    let response = server
        .put_auth("/api/v1/accounts/me/profile", &session.token, &body)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.nick, "renamed");
    assert_eq!(profile.name, session.signup.name);
    assert!(profile.public_email);
    assert!(!profile.public_name);
}

#[tokio::test]
async fn test_profile_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/accounts/me/profile").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTH");
}

#[tokio::test]
async fn test_account_posts_hide_drafts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let reader = Session::open(&server).await.unwrap();

    let public = author
        .create_post(&server, &CreatePostRequest::published("Public"))
        .await
        .unwrap();
    author
        .create_post(&server, &CreatePostRequest::draft("Draft"))
        .await
        .unwrap();

    let path = format!("/api/v1/accounts/{}/posts", public.author_id);

    let response = server.get_auth(&path, &author.token).await.unwrap();
    let own: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own.len(), 2);

    let response = server.get_auth(&path, &reader.token).await.unwrap();
    let visible: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, public.id);

    let response = server.get(&path).await.unwrap();
    let anonymous: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.len(), 1);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let post = session
        .create_post(&server, &CreatePostRequest::draft("Hello"))
        .await
        .unwrap();
    assert!(!post.published);
    assert_eq!((post.likes, post.dislikes), (0, 0));

    let path = format!("/api/v1/posts/{}", post.id);
    let response = server
        .patch_auth(&path, &session.token, &json!({ "published": true }))
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.published);
    assert_eq!(updated.title, "Hello");

    session.comment(&server, post.id, "First!").await.unwrap();

    let response = server.get(&path).await.unwrap();
    let fetched: PostWithCommentsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.post.id, post.id);
    assert_eq!(fetched.comments.len(), 1);
    assert_eq!(fetched.comments[0].content, "First!");

    let response = server.delete_auth(&path, &session.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_post_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let stranger = Session::open(&server).await.unwrap();

    let post = author
        .create_post(&server, &CreatePostRequest::published("Mine"))
        .await
        .unwrap();
    let path = format!("/api/v1/posts/{}", post.id);

    let response = server
        .patch_auth(&path, &stranger.token, &json!({ "title": "Yours" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "NOT_RESOURCE_OWNER");

    let response = server.delete_auth(&path, &stranger.token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let fetched: PostWithCommentsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.post.title, "Mine");
}

#[tokio::test]
async fn test_invalid_path_and_body() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let response = server.get("/api/v1/posts/not-a-number").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server
        .post_auth("/api/v1/posts", &session.token, &json!({ "published": true }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let commenter = Session::open(&server).await.unwrap();

    let post = author
        .create_post(&server, &CreatePostRequest::published("Discuss"))
        .await
        .unwrap();
    let comment = commenter.comment(&server, post.id, "Nice").await.unwrap();
    assert_eq!(comment.post_id, post.id);
    assert!(comment.published);

    let path = format!("/api/v1/comments/{}", comment.id);

    let response = server
        .patch_auth(&path, &author.token, &json!({ "content": "Hijacked" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .patch_auth(&path, &commenter.token, &json!({ "content": "Very nice" }))
        .await
        .unwrap();
    let updated: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "Very nice");

    let response = server.delete_auth(&path, &commenter.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let request = CreateCommentRequest {
        content: "Into the void".to_string(),
        published: true,
        post_id: i64::from(i32::MAX),
    };
    let response = server
        .post_auth("/api/v1/comments", &session.token, &request)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_deleting_post_removes_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let commenter = Session::open(&server).await.unwrap();

    let post = author
        .create_post(&server, &CreatePostRequest::published("Short-lived"))
        .await
        .unwrap();
    let comment = commenter.comment(&server, post.id, "Bye").await.unwrap();
    commenter
        .react(&server, &format!("/api/v1/comments/{}/like", comment.id))
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &author.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/comments/{}", comment.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_is_idempotent_and_switchable() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let voter = Session::open(&server).await.unwrap();

    let post = author
        .create_post(&server, &CreatePostRequest::published("Vote"))
        .await
        .unwrap();
    let like = format!("/api/v1/posts/{}/like", post.id);
    let dislike = format!("/api/v1/posts/{}/dislike", post.id);

    assert_eq!(voter.react(&server, &like).await.unwrap(), Counters::new(1, 0));
    assert_eq!(voter.react(&server, &like).await.unwrap(), Counters::new(1, 0));
    assert_eq!(voter.react(&server, &dislike).await.unwrap(), Counters::new(0, 1));
    assert_eq!(author.react(&server, &dislike).await.unwrap(), Counters::new(0, 2));
    assert_eq!(author.react(&server, &like).await.unwrap(), Counters::new(1, 1));

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let fetched: PostWithCommentsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((fetched.post.likes, fetched.post.dislikes), (1, 1));
}

#[tokio::test]
async fn test_comment_reactions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();

    let post = author
        .create_post(&server, &CreatePostRequest::published("Thread"))
        .await
        .unwrap();
    let comment = author.comment(&server, post.id, "Self-reply").await.unwrap();

    let dislike = format!("/api/v1/comments/{}/dislike", comment.id);
    assert_eq!(author.react(&server, &dislike).await.unwrap(), Counters::new(0, 1));

    let response = server
        .get(&format!("/api/v1/comments/{}", comment.id))
        .await
        .unwrap();
    let fetched: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((fetched.likes, fetched.dislikes), (0, 1));

    // Comment votes never touch the parent post
    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let fetched: PostWithCommentsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((fetched.post.likes, fetched.post.dislikes), (0, 0));
}

#[tokio::test]
async fn test_reacting_requires_auth_and_target() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let session = Session::open(&server).await.unwrap();

    let response = server.react("/api/v1/posts/1/like", None).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTH");

    let missing = format!("/api/v1/posts/{}/like", i32::MAX);
    let response = server.react(&missing, Some(&session.token)).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_POST");

    let missing = format!("/api/v1/comments/{}/dislike", i32::MAX);
    let response = server.react(&missing, Some(&session.token)).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");
}

#[tokio::test]
async fn test_concurrent_votes_keep_counters_consistent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = Session::open(&server).await.unwrap();
    let post = author
        .create_post(&server, &CreatePostRequest::published("Hot take"))
        .await
        .unwrap();

    let mut voters = Vec::new();
    for _ in 0..8 {
        voters.push(Session::open(&server).await.unwrap());
    }

    let like = format!("/api/v1/posts/{}/like", post.id);
    let dislike = format!("/api/v1/posts/{}/dislike", post.id);

    // Every voter likes then dislikes, all at once; each ends on dislike
    let results = join_all(voters.iter().map(|voter| {
        let server = &server;
        let like = &like;
        let dislike = &dislike;
        async move {
            voter.react(server, like).await?;
            voter.react(server, dislike).await
        }
    }))
    .await;

    for result in results {
        result.unwrap();
    }

    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let fetched: PostWithCommentsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((fetched.post.likes, fetched.post.dislikes), (0, 8));
}
