//! PostgreSQL implementation of PostRepository
//!
//! The upvote/save toggles run check-then-flip-then-adjust inside a single
//! transaction; the unique constraint on (post_id, user_id) backstops
//! concurrent toggles from the same user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::Post;
use campus_core::traits::{Page, PostFilter, PostRepository, RepoResult, ToggleOutcome};

use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

const POST_COLUMNS: &str = "id, post_type, title, content, image_url, author_id, tags, \
     target_colleges, target_departments, event_date, event_time, location, price, condition, \
     contact_info, link_url, deadline, views, upvotes_count, saves_count, comments_count, \
     community_id, status, is_pinned, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append the filter's conditions as a WHERE clause
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
        let mut sep = " WHERE ";

        if let Some(post_type) = filter.post_type {
            builder.push(sep).push("post_type = ").push_bind(post_type.as_str());
            sep = " AND ";
        }

        if let Some(college) = filter.college {
            builder
                .push(sep)
                .push("target_colleges @> ")
                .push_bind(Json(vec![college.as_str().to_string()]));
            sep = " AND ";
        }

        if let Some(department) = &filter.department {
            builder
                .push(sep)
                .push("target_departments @> ")
                .push_bind(Json(vec![department.clone()]));
            sep = " AND ";
        }

        if let Some(author_id) = filter.author_id {
            builder.push(sep).push("author_id = ").push_bind(author_id);
            sep = " AND ";
        }

        if let Some(community_id) = filter.community_id {
            builder.push(sep).push("community_id = ").push_bind(community_id);
            sep = " AND ";
        }

        if filter.only_pinned {
            builder.push(sep).push("is_pinned = TRUE");
            sep = " AND ";
        }

        if let Some(query) = filter.text_query() {
            let pattern = format!("%{query}%");
            builder
                .push(sep)
                .push("(title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR content ILIKE ")
                .push_bind(pattern)
                .push(" OR tags @> ")
                .push_bind(Json(vec![query.to_string()]))
                .push(")");
            sep = " AND ";
        }

        if let Some(saved_by) = filter.saved_by {
            builder
                .push(sep)
                .push("id IN (SELECT post_id FROM post_saves WHERE user_id = ")
                .push_bind(saved_by)
                .push(")");
        }
    }

    /// Shared toggle for the upvote/save association tables
    async fn toggle(
        &self,
        table: &'static str,
        counter: &'static str,
        post_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let post_exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)
            "#,
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !post_exists {
            return Err(post_not_found(post_id));
        }

        let exists_sql =
            format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE post_id = $1 AND user_id = $2)");
        let already_on = sqlx::query_scalar::<_, bool>(&exists_sql)
            .bind(post_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let outcome = if already_on {
            let delete_sql = format!("DELETE FROM {table} WHERE post_id = $1 AND user_id = $2");
            sqlx::query(&delete_sql)
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            let update_sql = format!(
                "UPDATE posts SET {counter} = GREATEST({counter} - 1, 0) \
                 WHERE id = $1 RETURNING {counter}"
            );
            let count = sqlx::query_scalar::<_, i32>(&update_sql)
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

            ToggleOutcome {
                active: false,
                count: i64::from(count),
            }
        } else {
            let insert_sql = format!(
                "INSERT INTO {table} (id, post_id, user_id, created_at) \
                 VALUES ($1, $2, $3, $4) ON CONFLICT (post_id, user_id) DO NOTHING"
            );
            let inserted = sqlx::query(&insert_sql)
                .bind(Uuid::new_v4())
                .bind(post_id)
                .bind(user_id)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?
                .rows_affected();

            let count = if inserted == 0 {
                // A concurrent toggle inserted first; the counter is theirs to bump
                let select_sql = format!("SELECT {counter} FROM posts WHERE id = $1");
                sqlx::query_scalar::<_, i32>(&select_sql)
                    .bind(post_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_db_error)?
            } else {
                let update_sql = format!(
                    "UPDATE posts SET {counter} = {counter} + 1 WHERE id = $1 RETURNING {counter}"
                );
                sqlx::query_scalar::<_, i32>(&update_sql)
                    .bind(post_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_db_error)?
            };

            ToggleOutcome {
                active: true,
                count: i64::from(count),
            }
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(outcome)
    }

    /// Batched "which of these posts carries this user's row" lookup
    async fn interaction_ids(
        &self,
        table: &'static str,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> RepoResult<Vec<Uuid>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!("SELECT post_id FROM {table} WHERE user_id = $1 AND post_id = ANY($2)");
        let ids = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(user_id)
            .bind(post_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ids)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Post::try_from).transpose()
    }

    #[instrument(skip(self, filter))]
    async fn list(&self, filter: &PostFilter, page: Page) -> RepoResult<Vec<Post>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        Self::push_filters(&mut builder, filter);
        builder
            .push(" ORDER BY is_pinned DESC, created_at DESC OFFSET ")
            .push_bind(page.offset.max(0))
            .push(" LIMIT ")
            .push_bind(page.limit.clamp(1, 100));

        let models = builder
            .build_query_as::<PostModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        models.into_iter().map(Post::try_from).collect()
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &PostFilter) -> RepoResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        Self::push_filters(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn trending(&self, since: DateTime<Utc>, limit: i64) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE created_at >= $1 AND status = 'ACTIVE' \
             ORDER BY (upvotes_count + comments_count * 3 + views / 100) DESC, id \
             LIMIT $2"
        );
        let models = sqlx::query_as::<_, PostModel>(&sql)
            .bind(since)
            .bind(limit.clamp(1, 100))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        models.into_iter().map(Post::try_from).collect()
    }

    #[instrument(skip(self, post))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let target_colleges: Vec<String> = post
            .target_colleges
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO posts (
                id, post_type, title, content, image_url, author_id, tags,
                target_colleges, target_departments, event_date, event_time, location,
                price, condition, contact_info, link_url, deadline, views,
                upvotes_count, saves_count, comments_count, community_id, status,
                is_pinned, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26
            )
            "#,
        )
        .bind(post.id)
        .bind(post.post_type.as_str())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.author_id)
        .bind(Json(&post.tags))
        .bind(Json(target_colleges))
        .bind(Json(&post.target_departments))
        .bind(post.event_date)
        .bind(&post.event_time)
        .bind(&post.location)
        .bind(&post.price)
        .bind(&post.condition)
        .bind(&post.contact_info)
        .bind(&post.link_url)
        .bind(post.deadline)
        .bind(post.views)
        .bind(post.upvotes_count)
        .bind(post.saves_count)
        .bind(post.comments_count)
        .bind(post.community_id)
        .bind(post.status.as_str())
        .bind(post.is_pinned)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let target_colleges: Vec<String> = post
            .target_colleges
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, image_url = $4, tags = $5,
                target_colleges = $6, target_departments = $7, event_date = $8,
                event_time = $9, location = $10, price = $11, condition = $12,
                contact_info = $13, link_url = $14, deadline = $15, status = $16,
                is_pinned = $17, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(Json(&post.tags))
        .bind(Json(target_colleges))
        .bind(Json(&post.target_departments))
        .bind(post.event_date)
        .bind(&post.event_time)
        .bind(&post.location)
        .bind(&post.price)
        .bind(&post.condition)
        .bind(&post.contact_info)
        .bind(&post.link_url)
        .bind(post.deadline)
        .bind(post.status.as_str())
        .bind(post.is_pinned)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE posts SET views = views + 1 WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn toggle_upvote(&self, post_id: Uuid, user_id: Uuid) -> RepoResult<ToggleOutcome> {
        self.toggle("post_upvotes", "upvotes_count", post_id, user_id)
            .await
    }

    #[instrument(skip(self))]
    async fn toggle_save(&self, post_id: Uuid, user_id: Uuid) -> RepoResult<ToggleOutcome> {
        self.toggle("post_saves", "saves_count", post_id, user_id)
            .await
    }

    #[instrument(skip(self, post_ids))]
    async fn upvoted_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> RepoResult<Vec<Uuid>> {
        self.interaction_ids("post_upvotes", user_id, post_ids).await
    }

    #[instrument(skip(self, post_ids))]
    async fn saved_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> RepoResult<Vec<Uuid>> {
        self.interaction_ids("post_saves", user_id, post_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }

    #[test]
    fn test_filter_sql_is_anded() {
        let filter = PostFilter {
            post_type: Some(campus_core::PostType::Event),
            query: Some("exam".to_string()),
            only_pinned: true,
            ..PostFilter::default()
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        PgPostRepository::push_filters(&mut builder, &filter);
        let sql = builder.sql();

        assert!(sql.contains("WHERE post_type = "));
        assert!(sql.contains(" AND is_pinned = TRUE"));
        assert!(sql.contains(" AND (title ILIKE "));
    }

    #[test]
    fn test_empty_query_adds_no_predicate() {
        let filter = PostFilter {
            query: Some(String::new()),
            ..PostFilter::default()
        };

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        PgPostRepository::push_filters(&mut builder, &filter);

        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM posts");
    }
}
