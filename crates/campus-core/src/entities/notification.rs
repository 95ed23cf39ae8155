//! Notification entity
//!
//! Notifications are created by the interaction layer as side effects (for
//! example a comment on a post notifies the post author). The targeted user
//! never creates their own notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::value_objects::EnumParseError;

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Reply,
    System,
    Reminder,
    Upvote,
    NewPost,
    CommunityInvite,
}

impl NotificationType {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reply => "REPLY",
            Self::System => "SYSTEM",
            Self::Reminder => "REMINDER",
            Self::Upvote => "UPVOTE",
            Self::NewPost => "NEW_POST",
            Self::CommunityInvite => "COMMUNITY_INVITE",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REPLY" => Ok(Self::Reply),
            "SYSTEM" => Ok(Self::System),
            "REMINDER" => Ok(Self::Reminder),
            "UPVOTE" => Ok(Self::Upvote),
            "NEW_POST" => Ok(Self::NewPost),
            "COMMUNITY_INVITE" => Ok(Self::CommunityInvite),
            other => Err(EnumParseError::new("notification type", other)),
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    pub meta: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the given user is the notification target
    #[inline]
    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
