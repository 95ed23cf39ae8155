//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: Uuid,
    pub notification_type: String,
    pub message: String,
    pub read: bool,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    pub meta: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
