//! PostgreSQL implementation of MemberRepository
//!
//! Join and leave are the only writers of `member_count`; each runs as a
//! single transaction and reports expected refusals as soft outcomes.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::CommunityMember;
use campus_core::traits::{
    JoinOutcome, LeaveOutcome, MemberProfile, MemberRepository, Page, RepoResult,
};

use crate::mappers::member_profile_from_model;
use crate::models::{CommunityMemberModel, MemberProfileModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        community_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<CommunityMember>> {
        let result = sqlx::query_as::<_, CommunityMemberModel>(
            r#"
            SELECT id, community_id, user_id, is_admin, joined_at
            FROM community_members
            WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommunityMember::from))
    }

    #[instrument(skip(self))]
    async fn join(&self, community_id: Uuid, user_id: Uuid) -> RepoResult<JoinOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let community_exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM communities WHERE id = $1)
            "#,
        )
        .bind(community_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !community_exists {
            return Ok(JoinOutcome::refused("Community not found"));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO community_members (id, community_id, user_id, is_admin, joined_at)
            VALUES ($1, $2, $3, FALSE, $4)
            ON CONFLICT (community_id, user_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(community_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if inserted == 0 {
            return Ok(JoinOutcome::refused(
                "User is already a member of this community",
            ));
        }

        let member_count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE communities SET member_count = member_count + 1
            WHERE id = $1 RETURNING member_count
            "#,
        )
        .bind(community_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(JoinOutcome::joined(i64::from(member_count)))
    }

    #[instrument(skip(self))]
    async fn leave(&self, community_id: Uuid, user_id: Uuid) -> RepoResult<LeaveOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let membership = sqlx::query_as::<_, CommunityMemberModel>(
            r#"
            SELECT id, community_id, user_id, is_admin, joined_at
            FROM community_members
            WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(membership) = membership else {
            return Ok(LeaveOutcome::refused(
                "User is not a member of this community",
            ));
        };

        // There is exactly one admin per community: its creator
        if membership.is_admin {
            return Ok(LeaveOutcome::refused(
                "Community admin cannot leave the community",
            ));
        }

        sqlx::query(
            r#"
            DELETE FROM community_members WHERE id = $1
            "#,
        )
        .bind(membership.id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let member_count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE communities SET member_count = GREATEST(member_count - 1, 0)
            WHERE id = $1 RETURNING member_count
            "#,
        )
        .bind(community_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LeaveOutcome::left(i64::from(member_count)))
    }

    #[instrument(skip(self))]
    async fn list(&self, community_id: Uuid, page: Page) -> RepoResult<Vec<MemberProfile>> {
        let results = sqlx::query_as::<_, MemberProfileModel>(
            r#"
            SELECT cm.user_id, u.username, cm.is_admin, cm.joined_at
            FROM community_members cm
            JOIN users u ON u.id = cm.user_id
            WHERE cm.community_id = $1
            ORDER BY cm.joined_at
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(community_id)
        .bind(page.offset.max(0))
        .bind(page.limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(member_profile_from_model).collect())
    }

    #[instrument(skip(self, community_ids))]
    async fn membership_flags(
        &self,
        user_id: Uuid,
        community_ids: &[Uuid],
    ) -> RepoResult<Vec<(Uuid, bool)>> {
        if community_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = sqlx::query_as::<_, (Uuid, bool)>(
            r#"
            SELECT community_id, is_admin
            FROM community_members
            WHERE user_id = $1 AND community_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(community_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMemberRepository>();
    }
}
