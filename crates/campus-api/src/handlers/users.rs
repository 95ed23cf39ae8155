//! User handlers
//!
//! Endpoints for profiles, per-user post listings, and statistics.

use axum::{
    extract::{Path, State},
    Json,
};
use campus_service::{
    CurrentUserResponse, PaginatedResponse, PostResponse, UpdateUserRequest, UserResponse,
    UserService, UserStatsResponse,
};

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the authenticated user's profile
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.current_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the authenticated user's profile
///
/// PUT /users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Aggregate statistics for the authenticated user
///
/// GET /users/me/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.stats(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a public profile by username
///
/// GET /users/{username}
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.profile_by_username(&username).await?;
    Ok(Json(response))
}

/// Posts authored by a user
///
/// GET /users/{username}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(username): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service
        .user_posts(&username, pagination.page(), viewer.user_id())
        .await?;
    Ok(Json(response))
}
