//! Notification handlers
//!
//! Endpoints for listing and acknowledging the viewer's notifications.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use campus_service::{
    MarkAllReadResponse, MessageResponse, NotificationResponse, NotificationService,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Extra query parameters for the notification listing
#[derive(Debug, Default, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// List the viewer's notifications
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .list(
            auth.user_id,
            query.unread_only,
            pagination.page_with_default(50),
        )
        .await?;
    Ok(Json(response))
}

/// Mark one notification as read
///
/// POST /notifications/{notification_id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(notification_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// Mark all notifications as read
///
/// POST /notifications/read-all
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_all_read(auth.user_id).await?;
    Ok(Json(response))
}

/// Delete a notification
///
/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.delete(notification_id, auth.user_id).await?;
    Ok(NoContent)
}
