//! Post database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub post_type: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub tags: Json<Vec<String>>,
    pub target_colleges: Json<Vec<String>>,
    pub target_departments: Json<Vec<String>>,
    pub event_date: Option<DateTime<Utc>>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub condition: Option<String>,
    pub contact_info: Option<String>,
    pub link_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub views: i32,
    pub upvotes_count: i32,
    pub saves_count: i32,
    pub comments_count: i32,
    pub community_id: Option<Uuid>,
    pub status: String,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
