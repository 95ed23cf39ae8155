//! Community and membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for communities table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityModel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub member_count: i32,
    pub community_type: String,
    pub image_url: Option<String>,
    pub college: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for community_members table
#[derive(Debug, Clone, FromRow)]
pub struct CommunityMemberModel {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

/// Member listing row joined with users for the username
#[derive(Debug, Clone, FromRow)]
pub struct MemberProfileModel {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}
