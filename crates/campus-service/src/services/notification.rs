//! Notification service
//!
//! Listing and ownership-checked read/delete operations. Notifications are
//! created by the other services as interaction side effects, never here.

use campus_core::traits::{NotificationFilter, Page};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{MarkAllReadResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the user's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Uuid,
        unread_only: bool,
        page: Page,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_user(user_id, NotificationFilter { unread_only }, page)
            .await?;

        Ok(notifications
            .iter()
            .map(NotificationResponse::from)
            .collect())
    }

    /// Mark one of the user's notifications as read
    #[instrument(skip(self))]
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Notification", notification_id.to_string())
            })?;

        if !notification.is_owner(user_id) {
            return Err(ServiceError::Domain(
                campus_core::DomainError::NotNotificationOwner,
            ));
        }

        self.ctx.notification_repo().mark_read(notification_id).await?;

        Ok(())
    }

    /// Mark all of the user's unread notifications as read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Uuid) -> ServiceResult<MarkAllReadResponse> {
        let marked_count = self.ctx.notification_repo().mark_all_read(user_id).await?;

        info!(user_id = %user_id, marked_count, "Notifications marked as read");

        Ok(MarkAllReadResponse { marked_count })
    }

    /// Delete one of the user's notifications
    #[instrument(skip(self))]
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Notification", notification_id.to_string())
            })?;

        if !notification.is_owner(user_id) {
            return Err(ServiceError::Domain(
                campus_core::DomainError::NotNotificationOwner,
            ));
        }

        self.ctx.notification_repo().delete(notification_id).await?;

        info!(notification_id = %notification_id, "Notification deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Ownership checks are exercised end-to-end in tests/integration.
}
