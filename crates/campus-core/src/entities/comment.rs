//! Comment entity
//!
//! Comments belong to exactly one post. An optional parent id makes the set
//! of comments on a post a forest: top-level comments have no parent, replies
//! point at their parent comment. No depth limit is enforced.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Check if this comment is a reply to another comment
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if a user is the comment author
    #[inline]
    pub fn is_author(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_reply() {
        let now = Utc::now();
        let mut comment = Comment {
            id: Uuid::new_v4(),
            content: "Nice".to_string(),
            post_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            parent_id: None,
            created_at: now,
            updated_at: now,
        };
        assert!(!comment.is_reply());

        comment.parent_id = Some(Uuid::new_v4());
        assert!(comment.is_reply());
    }
}
