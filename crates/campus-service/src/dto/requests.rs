//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use campus_core::entities::{CommunityType, PostStatus, PostType, UserRole};
use campus_core::value_objects::College;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
///
/// The username is derived from the email's local part; it is not supplied
/// by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 100, message = "Display name must be 2-100 characters"))]
    pub display_name: String,

    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: String,

    pub college: College,

    #[serde(default)]
    pub role: Option<UserRole>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update current user request (partial)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Display name must be 2-100 characters"))]
    pub display_name: Option<String>,

    pub avatar_url: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 2, max = 100, message = "Department must be 2-100 characters"))]
    pub department: Option<String>,

    pub interests: Option<Vec<String>>,
}

// ============================================================================
// Post Requests
// ============================================================================

fn validate_event_time(value: &str) -> Result<(), ValidationError> {
    if value.contains(':') {
        Ok(())
    } else {
        let mut err = ValidationError::new("event_time");
        err.message = Some("Event time must be HH:MM".into());
        Err(err)
    }
}

fn validate_link_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        let mut err = ValidationError::new("link_url");
        err.message = Some("Link URL must start with http:// or https://".into());
        Err(err)
    }
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 5, max = 200, message = "Title must be 5-200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 5000, message = "Content must be 10-5000 characters"))]
    pub content: String,

    #[serde(rename = "type")]
    pub post_type: PostType,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub target_colleges: Vec<College>,

    #[serde(default)]
    pub target_departments: Vec<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    // Event extras
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,

    #[validate(custom(function = validate_event_time))]
    #[serde(default)]
    pub event_time: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    // Marketplace extras
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub condition: Option<String>,

    #[serde(default)]
    pub contact_info: Option<String>,

    // Link extras
    #[validate(custom(function = validate_link_url))]
    #[serde(default)]
    pub link_url: Option<String>,

    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,

    #[serde(default)]
    pub community_id: Option<Uuid>,

    #[serde(default)]
    pub is_pinned: bool,
}

/// Update post request (partial)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 5, max = 200, message = "Title must be 5-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000, message = "Content must be 10-5000 characters"))]
    pub content: Option<String>,

    pub tags: Option<Vec<String>>,

    pub status: Option<PostStatus>,

    pub image_url: Option<String>,

    pub location: Option<String>,

    pub price: Option<String>,

    #[validate(custom(function = validate_link_url))]
    pub link_url: Option<String>,
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(rename = "type", default)]
    pub post_type: Option<PostType>,
    #[serde(default)]
    pub college: Option<College>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub only_pinned: bool,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,

    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

// ============================================================================
// Community Requests
// ============================================================================

/// Create community request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 3, max = 100, message = "Community name must be 3-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,

    #[serde(rename = "type")]
    pub community_type: CommunityType,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub college: Option<String>,
}

/// Query parameters for listing communities
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCommunitiesQuery {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(rename = "type", default)]
    pub community_type: Option<CommunityType>,
    #[serde(default)]
    pub query: Option<String>,
}
