//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations are applied on startup)
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a fresh user and return the auth payload
async fn register_user(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .expect("register request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

/// Create a post as the given user and return it
async fn create_post(server: &TestServer, token: &str) -> PostResponse {
    let request = CreatePostRequest::unique();
    let response = server
        .post_auth("/api/v1/posts", token, &request)
        .await
        .expect("create post request failed");
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_derives_username_from_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register_user(&server).await;

    let local_part = request.email.split('@').next().unwrap();
    assert!(auth.user.username.starts_with(local_part));
    assert_eq!(auth.user.role, "Student");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_rejects_foreign_email_domain() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::with_email("outsider@gmail.com");

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_DOMAIN_NOT_ALLOWED");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register_user(&server).await;

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_short_interests_list() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.interests = Some(vec!["ai".to_string(), "robotics".to_string()]);

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "TOO_FEW_INTERESTS");
}

#[tokio::test]
async fn test_login_and_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register_user(&server).await;

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &serde_json::json!({ "refresh_token": login.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!refreshed.access_token.is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register_user(&server).await;

    let response = server
        .post(
            "/api/v1/auth/login",
            &serde_json::json!({ "email": request.email, "password": "wrong-password" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post and Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_upvote_visible_per_viewer() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;

    let post = create_post(&server, &alice.access_token).await;

    // Bob upvotes Alice's post
    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{}/upvote", post.id), &bob.access_token)
        .await
        .unwrap();
    let toggle: UpvoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(toggle.upvoted);
    assert_eq!(toggle.count, 1);

    // Bob sees his upvote flag
    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &bob.access_token)
        .await
        .unwrap();
    let seen: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(seen.stats.upvotes, 1);
    assert!(seen.is_upvoted);

    // Anonymous viewers see the count but no flag
    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let seen: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(seen.stats.upvotes, 1);
    assert!(!seen.is_upvoted);
}

#[tokio::test]
async fn test_double_toggle_round_trips() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;
    let path = format!("/api/v1/posts/{}/upvote", post.id);

    let response = server.post_auth_empty(&path, &user.access_token).await.unwrap();
    let on: UpvoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(on.upvoted);
    assert_eq!(on.count, 1);

    let response = server.post_auth_empty(&path, &user.access_token).await.unwrap();
    let off: UpvoteToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!off.upvoted);
    assert_eq!(off.count, 0);
}

#[tokio::test]
async fn test_toggle_on_missing_post_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/posts/{}/upvote", uuid::Uuid::new_v4()),
            &user.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_saved_posts_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{}/save", post.id), &user.access_token)
        .await
        .unwrap();
    let toggle: SaveToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(toggle.saved);

    let response = server
        .get_auth("/api/v1/posts/me/saved", &user.access_token)
        .await
        .unwrap();
    let listing: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listing.data.iter().any(|p| p.id == post.id));
    assert!(listing.data.iter().all(|p| p.is_saved));
}

#[tokio::test]
async fn test_get_post_increments_views() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;
    let path = format!("/api/v1/posts/{}", post.id);

    let response = server.get(&path).await.unwrap();
    let first: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let second: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(second.stats.views > first.stats.views);
}

#[tokio::test]
async fn test_empty_query_equals_no_query() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;

    // An empty query string must behave like no query at all, not like
    // "match nothing": the fresh post shows up either way.
    let response = server.get("/api/v1/posts?limit=100").await.unwrap();
    let unfiltered: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unfiltered.data.iter().any(|p| p.id == post.id));

    let response = server.get("/api/v1/posts?limit=100&query=").await.unwrap();
    let empty_query: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(empty_query.data.iter().any(|p| p.id == post.id));
    assert!(empty_query.pagination.total >= unfiltered.data.len() as i64);
}

#[tokio::test]
async fn test_update_post_denied_for_other_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;
    let post = create_post(&server, &alice.access_token).await;

    let response = server
        .put_auth(
            &format!("/api/v1/posts/{}", post.id),
            &bob.access_token,
            &serde_json::json!({ "title": "Hijacked title" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_trending_lists_fresh_posts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;
    let post = create_post(&server, &alice.access_token).await;

    server
        .post_auth_empty(&format!("/api/v1/posts/{}/upvote", post.id), &bob.access_token)
        .await
        .unwrap();

    let response = server.get("/api/v1/posts/trending?limit=50").await.unwrap();
    let trending: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(trending.iter().any(|p| p.id == post.id));
}

// ============================================================================
// Community Tests
// ============================================================================

#[tokio::test]
async fn test_community_membership_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, creator) = register_user(&server).await;
    let (_, member) = register_user(&server).await;

    // Creator is auto-joined as admin with member_count seeded to 1
    let response = server
        .post_auth(
            "/api/v1/communities",
            &creator.access_token,
            &CreateCommunityRequest::unique(),
        )
        .await
        .unwrap();
    let community: CommunityResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(community.member_count, 1);
    assert!(community.is_member);
    assert!(community.is_admin);

    // Second user joins
    let join_path = format!("/api/v1/communities/{}/join", community.id);
    let response = server
        .post_auth_empty(&join_path, &member.access_token)
        .await
        .unwrap();
    let joined: JoinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(joined.joined);
    assert_eq!(joined.member_count, Some(2));

    // Joining twice is a soft no-op
    let response = server
        .post_auth_empty(&join_path, &member.access_token)
        .await
        .unwrap();
    let rejoined: JoinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!rejoined.joined);

    // The creator can never leave
    let response = server
        .post_auth_empty(
            &format!("/api/v1/communities/{}/leave", community.id),
            &creator.access_token,
        )
        .await
        .unwrap();
    let refused: LeaveResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!refused.left);

    // An ordinary member can
    let response = server
        .post_auth_empty(
            &format!("/api/v1/communities/{}/leave", community.id),
            &member.access_token,
        )
        .await
        .unwrap();
    let left: LeaveResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(left.left);
    assert_eq!(left.member_count, Some(1));
}

#[tokio::test]
async fn test_duplicate_community_name_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;

    let request = CreateCommunityRequest::unique();
    let response = server
        .post_auth("/api/v1/communities", &user.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/api/v1/communities", &user.access_token, &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "COMMUNITY_EXISTS");
}

// ============================================================================
// Comment and Notification Tests
// ============================================================================

#[tokio::test]
async fn test_comment_notifies_post_author() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;
    let post = create_post(&server, &alice.access_token).await;

    // Bob comments on Alice's post
    let response = server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &bob.access_token,
            &CreateCommentRequest::simple("Great tips!"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // The comment counter follows
    let response = server.get(&format!("/api/v1/posts/{}", post.id)).await.unwrap();
    let seen: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(seen.stats.comments, 1);

    // Alice received a reply notification referencing post and comment
    let response = server
        .get_auth("/api/v1/notifications?unread_only=true", &alice.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let reply = notifications
        .iter()
        .find(|n| n.post_id.as_deref() == Some(post.id.as_str()))
        .expect("reply notification missing");
    assert_eq!(reply.notification_type, "REPLY");
    assert_eq!(reply.comment_id.as_deref(), Some(comment.id.as_str()));
    assert!(!reply.read);

    // Bob may not acknowledge Alice's notification
    let response = server
        .post_auth_empty(
            &format!("/api/v1/notifications/{}/read", reply.id),
            &bob.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Alice may
    let response = server
        .post_auth_empty(
            &format!("/api/v1/notifications/{}/read", reply.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_self_comment_creates_no_notification() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;

    server
        .post_auth(
            &format!("/api/v1/posts/{}/comments", post.id),
            &user.access_token,
            &CreateCommentRequest::simple("Replying to myself"),
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/notifications", &user.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notifications
        .iter()
        .all(|n| n.post_id.as_deref() != Some(post.id.as_str())));
}

#[tokio::test]
async fn test_comment_replies_nest() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;
    let post = create_post(&server, &user.access_token).await;
    let comments_path = format!("/api/v1/posts/{}/comments", post.id);

    let response = server
        .post_auth(
            &comments_path,
            &user.access_token,
            &CreateCommentRequest::simple("Top level"),
        )
        .await
        .unwrap();
    let top: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &comments_path,
            &user.access_token,
            &CreateCommentRequest {
                content: "A reply".to_string(),
                parent_id: Some(top.id.clone()),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get(&comments_path).await.unwrap();
    let listing: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed_top = listing
        .iter()
        .find(|c| c.id == top.id)
        .expect("top-level comment missing");
    assert_eq!(listed_top.replies.len(), 1);
    assert_eq!(listed_top.replies[0].content, "A reply");
}

#[tokio::test]
async fn test_mark_all_notifications_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;
    let post = create_post(&server, &alice.access_token).await;

    for content in ["first", "second"] {
        server
            .post_auth(
                &format!("/api/v1/posts/{}/comments", post.id),
                &bob.access_token,
                &CreateCommentRequest::simple(content),
            )
            .await
            .unwrap();
    }

    let response = server
        .post_auth_empty("/api/v1/notifications/read-all", &alice.access_token)
        .await
        .unwrap();
    let marked: MarkAllReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.marked_count, 2);

    // A second pass has nothing left to mark
    let response = server
        .post_auth_empty("/api/v1/notifications/read-all", &alice.access_token)
        .await
        .unwrap();
    let marked: MarkAllReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.marked_count, 0);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_and_public_lookup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register_user(&server).await;

    let response = server
        .put_auth(
            "/api/v1/users/me",
            &user.access_token,
            &serde_json::json!({ "bio": "Hello campus", "display_name": "New Name" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/users/{}", user.user.username))
        .await
        .unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.display_name, "New Name");
    // Public profiles never expose the email
    assert!(profile.email.is_none());
}

#[tokio::test]
async fn test_requests_without_token_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/api/v1/notifications").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}
