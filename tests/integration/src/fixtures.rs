//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub department: String,
    pub college: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("student{suffix}@stu.cu.edu.ng"),
            password: "secret123".to_string(),
            display_name: format!("Student {suffix}"),
            department: "Computer Science".to_string(),
            college: "CST".to_string(),
            interests: None,
        }
    }

    pub fn with_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..Self::unique()
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub display_name: String,
    pub role: String,
    pub college: String,
    pub department: String,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
}

impl CreatePostRequest {
    pub fn casual(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: "Some useful content for everyone.".to_string(),
            post_type: "CASUAL".to_string(),
            tags: None,
            community_id: None,
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self::casual(&format!("Test post {suffix}"))
    }
}

/// Post stats block
#[derive(Debug, Deserialize)]
pub struct PostStats {
    pub views: i32,
    pub comments: i32,
    pub upvotes: i32,
    pub saves: i32,
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub title: String,
    pub author: UserResponse,
    pub stats: PostStats,
    pub status: String,
    pub is_pinned: bool,
    pub is_saved: bool,
    pub is_upvoted: bool,
}

/// Paginated post listing
#[derive(Debug, Deserialize)]
pub struct PostListResponse {
    pub data: Vec<PostResponse>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
    #[serde(rename = "hasPrev")]
    pub has_prev: bool,
}

/// Upvote toggle response
#[derive(Debug, Deserialize)]
pub struct UpvoteToggleResponse {
    pub upvoted: bool,
    pub count: i64,
}

/// Save toggle response
#[derive(Debug, Deserialize)]
pub struct SaveToggleResponse {
    pub saved: bool,
    pub count: i64,
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn simple(content: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_id: None,
        }
    }
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub content: String,
    pub post_id: String,
    pub author: UserResponse,
    pub replies: Vec<CommentResponse>,
}

/// Create community request
#[derive(Debug, Serialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub community_type: String,
}

impl CreateCommunityRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Community {suffix}"),
            description: "A community for tests".to_string(),
            community_type: "INTEREST".to_string(),
        }
    }
}

/// Community response
#[derive(Debug, Deserialize)]
pub struct CommunityResponse {
    pub id: String,
    pub name: String,
    pub member_count: i32,
    pub is_member: bool,
    pub is_admin: bool,
}

/// Join outcome
#[derive(Debug, Deserialize)]
pub struct JoinResponse {
    pub joined: bool,
    pub member_count: Option<i64>,
    pub message: Option<String>,
}

/// Leave outcome
#[derive(Debug, Deserialize)]
pub struct LeaveResponse {
    pub left: bool,
    pub member_count: Option<i64>,
    pub message: Option<String>,
}

/// Notification response
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub read: bool,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
}

/// Mark-all-read response
#[derive(Debug, Deserialize)]
pub struct MarkAllReadResponse {
    pub marked_count: u64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
