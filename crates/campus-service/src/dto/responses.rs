//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use campus_core::entities::{CommunityType, NotificationType, PostStatus, PostType, UserRole};
use campus_core::value_objects::College;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with offset-based pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Build a page from the true filtered total
    pub fn new(data: Vec<T>, offset: i64, limit: i64, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                page: offset / limit.max(1) + 1,
                limit,
                total,
                has_next: offset + limit < total,
                has_prev: offset > 0,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    /// True filtered row count, not the page length
    pub total: i64,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}

/// Simple human-readable message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (no email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub college: College,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_verified: bool,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub college: College,
    pub department: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_verified: bool,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate per-user statistics
#[derive(Debug, Clone, Serialize)]
pub struct UserStatsResponse {
    pub post_count: i64,
    pub upvote_count: i64,
    pub comment_count: i64,
    pub saved_count: i64,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Denormalized interaction counters of a post
#[derive(Debug, Clone, Serialize)]
pub struct PostStats {
    pub views: i32,
    pub comments: i32,
    pub upvotes: i32,
    pub saves: i32,
}

/// Full post response with author and viewer flags
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub target_colleges: Vec<College>,
    pub target_departments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author: UserResponse,
    pub stats: PostStats,
    pub status: PostStatus,
    pub is_pinned: bool,
    pub is_saved: bool,
    pub is_upvoted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upvote toggle result
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpvoteToggleResponse {
    pub upvoted: bool,
    pub count: i64,
}

/// Save toggle result
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SaveToggleResponse {
    pub saved: bool,
    pub count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment with its reply tree
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub replies: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Community Responses
// ============================================================================

/// Community response with viewer membership flags
#[derive(Debug, Clone, Serialize)]
pub struct CommunityResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub member_count: i32,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    pub creator_id: Uuid,
    pub is_member: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Community member listing row
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

/// Join attempt outcome
#[derive(Debug, Clone, Serialize)]
pub struct JoinResponse {
    pub joined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Leave attempt outcome
#[derive(Debug, Clone, Serialize)]
pub struct LeaveResponse {
    pub left: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Notification response
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<Uuid>,
    pub meta: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Mark-all-read result
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta() {
        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total, 7);
        assert!(page.pagination.has_next);
        assert!(!page.pagination.has_prev);

        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![7], 6, 3, 7);
        assert_eq!(page.pagination.page, 3);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_pagination_serializes_camel_case_flags() {
        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 0, 20, 0);
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"hasNext\":false"));
        assert!(json.contains("\"hasPrev\":false"));
    }
}
