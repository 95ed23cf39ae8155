//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::Comment;
use campus_core::traits::{CommentRepository, Page, RepoResult};

use crate::models::CommentModel;

use super::error::{map_db_error, post_not_found};

const COMMENT_COLUMNS: &str = "id, content, post_id, author_id, parent_id, created_at, updated_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO comments (id, content, post_id, author_id, parent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.post_id)
        .bind(comment.author_id)
        .bind(comment.parent_id)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Counter stays equal to the comment row count for the post
        let result = sqlx::query(
            r#"
            UPDATE posts SET comments_count = comments_count + 1 WHERE id = $1
            "#,
        )
        .bind(comment.post_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(comment.post_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_top_level(&self, post_id: Uuid, page: Page) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE post_id = $1 AND parent_id IS NULL \
             ORDER BY created_at OFFSET $2 LIMIT $3"
        );
        let results = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(post_id)
            .bind(page.offset.max(0))
            .bind(page.limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, parent_ids))]
    async fn find_replies(&self, parent_ids: &[Uuid]) -> RepoResult<Vec<Comment>> {
        if parent_ids.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE parent_id = ANY($1) ORDER BY created_at"
        );
        let results = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(parent_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
