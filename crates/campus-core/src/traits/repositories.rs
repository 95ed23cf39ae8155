//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Comment, Community, CommunityMember, CommunityType, Notification, Post, PostType, User,
};
use crate::error::DomainError;
use crate::value_objects::College;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset/limit pagination window
///
/// Limits are clamped to [1, 100] by implementations.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

impl Page {
    /// Create a page with a clamped limit
    #[must_use]
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.clamp(1, 100),
        }
    }
}

/// Composite post filter; all present fields are ANDed together
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub post_type: Option<PostType>,
    pub college: Option<College>,
    pub department: Option<String>,
    pub author_id: Option<Uuid>,
    pub community_id: Option<Uuid>,
    pub saved_by: Option<Uuid>,
    pub query: Option<String>,
    pub only_pinned: bool,
}

impl PostFilter {
    /// The free-text query, with an empty or whitespace-only string treated
    /// as no query at all.
    #[must_use]
    pub fn text_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Outcome of an upvote/save toggle: the new state plus the refreshed counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub active: bool,
    pub count: i64,
}

/// Outcome of a community join attempt (soft failure, not an error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub joined: bool,
    pub member_count: Option<i64>,
    pub message: Option<String>,
}

impl JoinOutcome {
    #[must_use]
    pub fn joined(member_count: i64) -> Self {
        Self {
            joined: true,
            member_count: Some(member_count),
            message: None,
        }
    }

    #[must_use]
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            joined: false,
            member_count: None,
            message: Some(message.into()),
        }
    }
}

/// Outcome of a community leave attempt (soft failure, not an error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub left: bool,
    pub member_count: Option<i64>,
    pub message: Option<String>,
}

impl LeaveOutcome {
    #[must_use]
    pub fn left(member_count: i64) -> Self {
        Self {
            left: true,
            member_count: Some(member_count),
            message: None,
        }
    }

    #[must_use]
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            left: false,
            member_count: None,
            message: Some(message.into()),
        }
    }
}

/// Member listing row joined with the member's username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub joined_at: DateTime<Utc>,
}

/// Aggregate per-user statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub post_count: i64,
    pub upvote_count: i64,
    pub comment_count: i64,
    pub saved_count: i64,
}

/// Notification listing filter
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFilter {
    pub unread_only: bool,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Batched lookup of several users at once (for author embedding)
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Aggregate statistics for a user (posts, received upvotes, comments, saves)
    async fn stats(&self, user_id: Uuid) -> RepoResult<UserStats>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;

    /// List posts matching a filter, pinned first then newest first
    async fn list(&self, filter: &PostFilter, page: Page) -> RepoResult<Vec<Post>>;

    /// Count posts matching a filter (true total, not page length)
    async fn count(&self, filter: &PostFilter) -> RepoResult<i64>;

    /// Top active posts created since `since`, ordered by trending score
    async fn trending(&self, since: DateTime<Utc>, limit: i64) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post (cascades to comments, upvotes, saves)
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Increment the view counter by one
    async fn increment_views(&self, id: Uuid) -> RepoResult<()>;

    /// Flip the viewer's upvote and adjust `upvotes_count` in one transaction
    async fn toggle_upvote(&self, post_id: Uuid, user_id: Uuid) -> RepoResult<ToggleOutcome>;

    /// Flip the viewer's save and adjust `saves_count` in one transaction
    async fn toggle_save(&self, post_id: Uuid, user_id: Uuid) -> RepoResult<ToggleOutcome>;

    /// Of the given posts, the ids the user has upvoted
    async fn upvoted_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> RepoResult<Vec<Uuid>>;

    /// Of the given posts, the ids the user has saved
    async fn saved_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> RepoResult<Vec<Uuid>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>>;

    /// Insert a comment and bump the post's `comments_count` in one transaction
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Top-level comments of a post, oldest first
    async fn find_top_level(&self, post_id: Uuid, page: Page) -> RepoResult<Vec<Comment>>;

    /// All replies whose parent is one of the given comments, oldest first
    async fn find_replies(&self, parent_ids: &[Uuid]) -> RepoResult<Vec<Comment>>;
}

// ============================================================================
// Community Repository
// ============================================================================

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Find community by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Community>>;

    /// Find community by name, case-insensitively
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Community>>;

    /// Create a community with the creator auto-joined as admin and
    /// `member_count` seeded to 1, atomically
    async fn create(&self, community: &Community) -> RepoResult<()>;

    /// Search communities by name/description substring and optional type,
    /// ordered by member count descending
    async fn search(
        &self,
        query: Option<&str>,
        community_type: Option<CommunityType>,
        page: Page,
    ) -> RepoResult<Vec<Community>>;

    /// Communities the user belongs to, most recently joined first
    async fn find_by_member(&self, user_id: Uuid) -> RepoResult<Vec<Community>>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find a membership row
    async fn find(&self, community_id: Uuid, user_id: Uuid)
        -> RepoResult<Option<CommunityMember>>;

    /// Join a community: insert the membership and bump `member_count` in one
    /// transaction. Soft-fails when the community is missing or the user is
    /// already a member.
    async fn join(&self, community_id: Uuid, user_id: Uuid) -> RepoResult<JoinOutcome>;

    /// Leave a community: delete the membership and decrement `member_count`
    /// (floored at 0) in one transaction. Soft-fails when no membership
    /// exists or the membership is an admin (the creator can never leave).
    async fn leave(&self, community_id: Uuid, user_id: Uuid) -> RepoResult<LeaveOutcome>;

    /// Member listing with usernames, ordered by join time
    async fn list(&self, community_id: Uuid, page: Page) -> RepoResult<Vec<MemberProfile>>;

    /// Of the given communities, the (id, is_admin) pairs the user belongs to
    async fn membership_flags(
        &self,
        user_id: Uuid,
        community_ids: &[Uuid],
    ) -> RepoResult<Vec<(Uuid, bool)>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Notification>>;

    /// Create a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Notifications targeted at a user, newest first
    async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: Page,
    ) -> RepoResult<Vec<Notification>>;

    /// Mark one notification as read
    async fn mark_read(&self, id: Uuid) -> RepoResult<()>;

    /// Mark all of a user's unread notifications as read, returning the count
    async fn mark_all_read(&self, user_id: Uuid) -> RepoResult<u64>;

    /// Delete a notification
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamps_limit() {
        assert_eq!(Page::new(0, 0).limit, 1);
        assert_eq!(Page::new(0, 250).limit, 100);
        assert_eq!(Page::new(-5, 20).offset, 0);
    }

    #[test]
    fn test_empty_query_is_no_query() {
        let mut filter = PostFilter::default();
        assert_eq!(filter.text_query(), None);

        filter.query = Some(String::new());
        assert_eq!(filter.text_query(), None);

        filter.query = Some("   ".to_string());
        assert_eq!(filter.text_query(), None);

        filter.query = Some("exam".to_string());
        assert_eq!(filter.text_query(), Some("exam"));
    }

    #[test]
    fn test_join_outcome_helpers() {
        let ok = JoinOutcome::joined(4);
        assert!(ok.joined);
        assert_eq!(ok.member_count, Some(4));
        assert!(ok.message.is_none());

        let refused = JoinOutcome::refused("User is already a member of this community");
        assert!(!refused.joined);
        assert!(refused.member_count.is_none());
    }

    #[test]
    fn test_leave_outcome_helpers() {
        let refused = LeaveOutcome::refused("Community admin cannot leave the community");
        assert!(!refused.left);
        assert!(refused.message.is_some());
    }
}
