//! Post handlers
//!
//! Endpoints for the post feed, single posts, toggles, and comments.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use campus_service::{
    CommentResponse, CommentService, CreateCommentRequest, CreatePostRequest, ListPostsQuery,
    PaginatedResponse, PostResponse, PostService, SaveToggleResponse, UpdatePostRequest,
    UpvoteToggleResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List posts with filters and pagination
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.list_posts(query, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Query parameters for the trending feed
#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default = "default_trending_limit")]
    pub limit: i64,
}

fn default_trending_limit() -> i64 {
    10
}

/// Trending posts from the last 7 days
///
/// GET /posts/trending
pub async fn trending_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.trending(query.limit, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Create a new post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a single post (bumps the view counter)
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Update a post (owner or admin)
///
/// PUT /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.update_post(post_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a post (owner or admin)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Toggle the viewer's upvote on a post
///
/// POST /posts/{post_id}/upvote
pub async fn toggle_upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Json<UpvoteToggleResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.toggle_upvote(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Toggle the viewer's save on a post
///
/// POST /posts/{post_id}/save
pub async fn toggle_save(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> ApiResult<Json<SaveToggleResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.toggle_save(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// List a post's comments with their reply trees
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.list_comments(post_id, pagination.page()).await?;
    Ok(Json(response))
}

/// Create a comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .create_comment(post_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List the viewer's saved posts
///
/// GET /posts/me/saved
pub async fn saved_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.saved_posts(auth.user_id, pagination.page()).await?;
    Ok(Json(response))
}
