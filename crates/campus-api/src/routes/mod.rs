//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, communities, health, notifications, posts, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(community_routes())
        .merge(notification_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::get_current_user))
        .route("/users/me", put(users::update_current_user))
        .route("/users/me/stats", get(users::get_user_stats))
        .route("/users/:username", get(users::get_user_profile))
        .route("/users/:username/posts", get(users::get_user_posts))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts", post(posts::create_post))
        .route("/posts/trending", get(posts::trending_posts))
        .route("/posts/me/saved", get(posts::saved_posts))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", put(posts::update_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/upvote", post(posts::toggle_upvote))
        .route("/posts/:post_id/save", post(posts::toggle_save))
        .route("/posts/:post_id/comments", get(posts::list_comments))
        .route("/posts/:post_id/comments", post(posts::create_comment))
}

/// Community routes
fn community_routes() -> Router<AppState> {
    Router::new()
        .route("/communities", get(communities::list_communities))
        .route("/communities", post(communities::create_community))
        .route("/communities/:community_id", get(communities::get_community))
        .route(
            "/communities/:community_id/join",
            post(communities::join_community),
        )
        .route(
            "/communities/:community_id/leave",
            post(communities::leave_community),
        )
        .route(
            "/communities/:community_id/members",
            get(communities::get_community_members),
        )
        .route(
            "/communities/:community_id/posts",
            get(communities::get_community_posts),
        )
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/read-all",
            post(notifications::mark_all_notifications_read),
        )
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_notification_read),
        )
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
}
