//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::Notification;
use campus_core::traits::{NotificationFilter, NotificationRepository, Page, RepoResult};

use crate::models::NotificationModel;

use super::error::{map_db_error, notification_not_found};

const NOTIFICATION_COLUMNS: &str = "id, notification_type, message, read, user_id, post_id, \
     comment_id, community_id, meta, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Notification>> {
        let sql = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1");
        let result = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, notification_type, message, read, user_id, post_id,
                comment_id, community_id, meta, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(notification.id)
        .bind(notification.notification_type.as_str())
        .bind(&notification.message)
        .bind(notification.read)
        .bind(notification.user_id)
        .bind(notification.post_id)
        .bind(notification.comment_id)
        .bind(notification.community_id)
        .bind(Json(&notification.meta))
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: Page,
    ) -> RepoResult<Vec<Notification>> {
        let sql = if filter.unread_only {
            format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
                 WHERE user_id = $1 AND read = FALSE \
                 ORDER BY created_at DESC OFFSET $2 LIMIT $3"
            )
        } else {
            format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
                 WHERE user_id = $1 \
                 ORDER BY created_at DESC OFFSET $2 LIMIT $3"
            )
        };

        let results = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(user_id)
            .bind(page.offset.max(0))
            .bind(page.limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM notifications WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}
