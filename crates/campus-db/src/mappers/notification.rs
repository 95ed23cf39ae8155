//! Notification model → entity mapper

use campus_core::entities::Notification;
use campus_core::error::DomainError;

use crate::models::NotificationModel;

use super::corrupt_enum;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: model.id,
            notification_type: model.notification_type.parse().map_err(corrupt_enum)?,
            message: model.message,
            read: model.read,
            user_id: model.user_id,
            post_id: model.post_id,
            comment_id: model.comment_id,
            community_id: model.community_id,
            meta: model.meta.0,
            created_at: model.created_at,
        })
    }
}
