//! Error handling utilities for repositories

use campus_core::error::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
///
/// The closure receives the violated constraint name when the driver
/// reports one.
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Uuid) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: Uuid) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "notification not found" error
pub fn notification_not_found(id: Uuid) -> DomainError {
    DomainError::NotificationNotFound(id)
}
