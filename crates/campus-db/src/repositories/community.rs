//! PostgreSQL implementation of CommunityRepository
//!
//! Community creation seeds `member_count` to 1 and inserts the creator as
//! an admin member in the same transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::{Community, CommunityType};
use campus_core::error::DomainError;
use campus_core::traits::{CommunityRepository, Page, RepoResult};

use crate::models::CommunityModel;

use super::error::{map_db_error, map_unique_violation};

const COMMUNITY_COLUMNS: &str = "id, name, description, member_count, community_type, image_url, \
     college, creator_id, created_at, updated_at";

/// PostgreSQL implementation of CommunityRepository
#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    /// Create a new PgCommunityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Community>> {
        let sql = format!("SELECT {COMMUNITY_COLUMNS} FROM communities WHERE id = $1");
        let result = sqlx::query_as::<_, CommunityModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Community::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Community>> {
        let sql = format!("SELECT {COMMUNITY_COLUMNS} FROM communities WHERE LOWER(name) = LOWER($1)");
        let result = sqlx::query_as::<_, CommunityModel>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Community::try_from).transpose()
    }

    #[instrument(skip(self, community))]
    async fn create(&self, community: &Community) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO communities (
                id, name, description, member_count, community_type, image_url,
                college, creator_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, 1, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(community.id)
        .bind(&community.name)
        .bind(&community.description)
        .bind(community.community_type.as_str())
        .bind(&community.image_url)
        .bind(&community.college)
        .bind(community.creator_id)
        .bind(community.created_at)
        .bind(community.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, |_| {
                DomainError::CommunityNameExists(community.name.clone())
            })
        })?;

        // Creator is the first member and the only admin
        sqlx::query(
            r#"
            INSERT INTO community_members (id, community_id, user_id, is_admin, joined_at)
            VALUES ($1, $2, $3, TRUE, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(community.id)
        .bind(community.creator_id)
        .bind(community.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        query: Option<&str>,
        community_type: Option<CommunityType>,
        page: Page,
    ) -> RepoResult<Vec<Community>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COMMUNITY_COLUMNS} FROM communities"));

        let mut sep = " WHERE ";
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{q}%");
            builder
                .push(sep)
                .push("(name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
            sep = " AND ";
        }
        if let Some(ty) = community_type {
            builder.push(sep).push("community_type = ").push_bind(ty.as_str());
        }

        builder
            .push(" ORDER BY member_count DESC OFFSET ")
            .push_bind(page.offset.max(0))
            .push(" LIMIT ")
            .push_bind(page.limit.clamp(1, 100));

        let models = builder
            .build_query_as::<CommunityModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        models.into_iter().map(Community::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, user_id: Uuid) -> RepoResult<Vec<Community>> {
        let sql = format!(
            "SELECT c.id, c.name, c.description, c.member_count, c.community_type, \
             c.image_url, c.college, c.creator_id, c.created_at, c.updated_at \
             FROM communities c \
             JOIN community_members cm ON cm.community_id = c.id \
             WHERE cm.user_id = $1 \
             ORDER BY cm.joined_at DESC"
        );
        let models = sqlx::query_as::<_, CommunityModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        models.into_iter().map(Community::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommunityRepository>();
    }
}
