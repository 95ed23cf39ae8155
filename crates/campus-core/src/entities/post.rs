//! Post entity - the central content object of the platform
//!
//! Posts carry denormalized interaction counters (`views`, `upvotes_count`,
//! `saves_count`, `comments_count`). The counters are only ever adjusted by
//! the toggle/comment operations so they stay equal to the row counts of the
//! corresponding association tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::value_objects::{College, EnumParseError};

/// Post category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Opportunity,
    Idea,
    Link,
    Event,
    Casual,
    Marketplace,
    LostAndFound,
    News,
    Club,
    Bounty,
}

impl PostType {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opportunity => "OPPORTUNITY",
            Self::Idea => "IDEA",
            Self::Link => "LINK",
            Self::Event => "EVENT",
            Self::Casual => "CASUAL",
            Self::Marketplace => "MARKETPLACE",
            Self::LostAndFound => "LOST_AND_FOUND",
            Self::News => "NEWS",
            Self::Club => "CLUB",
            Self::Bounty => "BOUNTY",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPPORTUNITY" => Ok(Self::Opportunity),
            "IDEA" => Ok(Self::Idea),
            "LINK" => Ok(Self::Link),
            "EVENT" => Ok(Self::Event),
            "CASUAL" => Ok(Self::Casual),
            "MARKETPLACE" => Ok(Self::Marketplace),
            "LOST_AND_FOUND" => Ok(Self::LostAndFound),
            "NEWS" => Ok(Self::News),
            "CLUB" => Ok(Self::Club),
            "BOUNTY" => Ok(Self::Bounty),
            other => Err(EnumParseError::new("post type", other)),
        }
    }
}

/// Post lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Active,
    Pending,
    Sold,
}

impl PostStatus {
    /// Get the canonical string form used in storage and on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Sold => "SOLD",
        }
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "PENDING" => Ok(Self::Pending),
            "SOLD" => Ok(Self::Sold),
            other => Err(EnumParseError::new("post status", other)),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,

    // Targeting
    pub tags: Vec<String>,
    pub target_colleges: Vec<College>,
    pub target_departments: Vec<String>,

    // Event extras
    pub event_date: Option<DateTime<Utc>>,
    pub event_time: Option<String>,
    pub location: Option<String>,

    // Marketplace extras
    pub price: Option<String>,
    pub condition: Option<String>,
    pub contact_info: Option<String>,

    // Link extras
    pub link_url: Option<String>,
    pub deadline: Option<DateTime<Utc>>,

    // Denormalized interaction counters
    pub views: i32,
    pub upvotes_count: i32,
    pub saves_count: i32,
    pub comments_count: i32,

    pub community_id: Option<Uuid>,
    pub status: PostStatus,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Check if a user is the post author
    #[inline]
    pub fn is_author(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Trending score: upvotes + 3x comments + damped views.
    ///
    /// Comments weigh 3x an upvote as the stronger engagement signal; raw
    /// views are divided by 100 so traffic alone cannot dominate.
    #[must_use]
    pub fn trending_score(&self) -> i64 {
        i64::from(self.upvotes_count)
            + 3 * i64::from(self.comments_count)
            + i64::from(self.views) / 100
    }
}

/// Upvote association row, unique per (post, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpvote {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Save (bookmark) association row, unique per (post, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSave {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            post_type: PostType::Casual,
            title: "Exam tips".to_string(),
            content: "Start early, sleep well.".to_string(),
            image_url: None,
            author_id: Uuid::new_v4(),
            tags: vec![],
            target_colleges: vec![],
            target_departments: vec![],
            event_date: None,
            event_time: None,
            location: None,
            price: None,
            condition: None,
            contact_info: None,
            link_url: None,
            deadline: None,
            views: 0,
            upvotes_count: 0,
            saves_count: 0,
            comments_count: 0,
            community_id: None,
            status: PostStatus::Active,
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_author() {
        let post = sample_post();
        assert!(post.is_author(post.author_id));
        assert!(!post.is_author(Uuid::new_v4()));
    }

    #[test]
    fn test_trending_score_weights_comments() {
        let mut post = sample_post();
        post.upvotes_count = 5;
        post.comments_count = 2;
        post.views = 250;
        // 5 + 3*2 + 250/100 = 13
        assert_eq!(post.trending_score(), 13);
    }

    #[test]
    fn test_trending_score_damps_views() {
        let mut post = sample_post();
        post.views = 99;
        assert_eq!(post.trending_score(), 0);

        post.views = 100;
        assert_eq!(post.trending_score(), 1);
    }

    #[test]
    fn test_post_type_round_trip() {
        for ty in [
            PostType::Opportunity,
            PostType::Idea,
            PostType::Link,
            PostType::Event,
            PostType::Casual,
            PostType::Marketplace,
            PostType::LostAndFound,
            PostType::News,
            PostType::Club,
            PostType::Bounty,
        ] {
            assert_eq!(ty.as_str().parse::<PostType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_post_type_serde() {
        assert_eq!(
            serde_json::to_string(&PostType::LostAndFound).unwrap(),
            "\"LOST_AND_FOUND\""
        );
        let ty: PostType = serde_json::from_str("\"MARKETPLACE\"").unwrap();
        assert_eq!(ty, PostType::Marketplace);
    }

    #[test]
    fn test_post_status_round_trip() {
        for status in [PostStatus::Active, PostStatus::Pending, PostStatus::Sold] {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
        assert_eq!(PostStatus::default(), PostStatus::Active);
    }
}
