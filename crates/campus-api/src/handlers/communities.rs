//! Community handlers
//!
//! Endpoints for community search, creation, membership, and post feeds.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use campus_service::{
    CommunityResponse, CommunityService, CreateCommunityRequest, JoinResponse, LeaveResponse,
    ListCommunitiesQuery, MemberResponse, PaginatedResponse, PostResponse,
};
use uuid::Uuid;

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Search communities
///
/// GET /communities
pub async fn list_communities(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Query(query): Query<ListCommunitiesQuery>,
) -> ApiResult<Json<Vec<CommunityResponse>>> {
    let service = CommunityService::new(state.service_context());
    let response = service.list_communities(query, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Create a new community
///
/// POST /communities
pub async fn create_community(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommunityRequest>,
) -> ApiResult<Created<Json<CommunityResponse>>> {
    let service = CommunityService::new(state.service_context());
    let response = service.create_community(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get community details
///
/// GET /communities/{community_id}
pub async fn get_community(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(community_id): Path<Uuid>,
) -> ApiResult<Json<CommunityResponse>> {
    let service = CommunityService::new(state.service_context());
    let response = service.get_community(community_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Join a community
///
/// POST /communities/{community_id}/join
pub async fn join_community(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(community_id): Path<Uuid>,
) -> ApiResult<Json<JoinResponse>> {
    let service = CommunityService::new(state.service_context());
    let response = service.join(community_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Leave a community
///
/// POST /communities/{community_id}/leave
pub async fn leave_community(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(community_id): Path<Uuid>,
) -> ApiResult<Json<LeaveResponse>> {
    let service = CommunityService::new(state.service_context());
    let response = service.leave(community_id, auth.user_id).await?;
    Ok(Json(response))
}

/// List community members
///
/// GET /communities/{community_id}/members
pub async fn get_community_members(
    State(state): State<AppState>,
    Path(community_id): Path<Uuid>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = CommunityService::new(state.service_context());
    let response = service
        .members(community_id, pagination.page_with_default(50))
        .await?;
    Ok(Json(response))
}

/// List posts attached to a community
///
/// GET /communities/{community_id}/posts
pub async fn get_community_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(community_id): Path<Uuid>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = CommunityService::new(state.service_context());
    let response = service
        .community_posts(community_id, pagination.page(), viewer.user_id())
        .await?;
    Ok(Json(response))
}
