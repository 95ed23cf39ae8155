//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("User not found: {0}")]
    UsernameNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    #[error("Community not found: {0}")]
    CommunityNotFound(Uuid),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Uuid),

    #[error("Membership not found")]
    MembershipNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email domain not allowed: {0}")]
    EmailDomainNotAllowed(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Select at least {min} interests")]
    TooFewInterests { min: usize },

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the post author")]
    NotPostAuthor,

    #[error("Not the notification owner")]
    NotNotificationOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Community '{0}' already exists")]
    CommunityNameExists(String),

    #[error("Already a member of this community")]
    AlreadyMember,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UsernameNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::CommunityNotFound(_) => "UNKNOWN_COMMUNITY",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::MembershipNotFound => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmailDomainNotAllowed(_) => "EMAIL_DOMAIN_NOT_ALLOWED",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::TooFewInterests { .. } => "TOO_FEW_INTERESTS",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotNotificationOwner => "NOT_NOTIFICATION_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::CommunityNameExists(_) => "COMMUNITY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UsernameNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::CommunityNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::MembershipNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmailDomainNotAllowed(_)
                | Self::WeakPassword(_)
                | Self::TooFewInterests { .. }
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor | Self::NotNotificationOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::CommunityNameExists(_)
                | Self::AlreadyMember
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::PostNotFound(Uuid::nil());
        assert_eq!(err.code(), "UNKNOWN_POST");

        let err = DomainError::EmailDomainNotAllowed("gmail.com".to_string());
        assert_eq!(err.code(), "EMAIL_DOMAIN_NOT_ALLOWED");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::UserNotFound(Uuid::nil()).is_not_found());
        assert!(DomainError::MembershipNotFound.is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
    }

    #[test]
    fn test_is_validation() {
        assert!(DomainError::TooFewInterests { min: 3 }.is_validation());
        assert!(!DomainError::NotPostAuthor.is_validation());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::NotPostAuthor.is_authorization());
        assert!(!DomainError::AlreadyMember.is_authorization());
    }

    #[test]
    fn test_is_conflict() {
        assert!(DomainError::AlreadyMember.is_conflict());
        assert!(DomainError::CommunityNameExists("Robotics Club".to_string()).is_conflict());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::TooFewInterests { min: 3 };
        assert_eq!(err.to_string(), "Select at least 3 interests");

        let err = DomainError::ContentTooLong { max: 5000 };
        assert_eq!(err.to_string(), "Content too long: max 5000 characters");
    }
}
