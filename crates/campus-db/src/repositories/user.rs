//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use campus_core::entities::User;
use campus_core::error::DomainError;
use campus_core::traits::{RepoResult, UserRepository, UserStats};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, username, email, display_name, role, avatar_url, college, \
     department, bio, is_verified, interests, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email", email).await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one("username", username).await
    }

    #[instrument(skip(self, ids))]
    async fn find_by_ids(&self, ids: &[Uuid]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let results = sqlx::query_as::<_, UserModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, user, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, display_name, role, avatar_url, college,
                department, bio, is_verified, interests, password_hash, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(&user.avatar_url)
        .bind(user.college.as_str())
        .bind(&user.department)
        .bind(&user.bio)
        .bind(user.is_verified)
        .bind(Json(&user.interests))
        .bind(password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some(c) if c.contains("username") => DomainError::UsernameAlreadyExists,
                _ => DomainError::EmailAlreadyExists,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, user))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET display_name = $2, avatar_url = $3, bio = $4, department = $5,
                interests = $6, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(&user.bio)
        .bind(&user.department)
        .bind(Json(&user.interests))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r#"
            SELECT password_hash FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn stats(&self, user_id: Uuid) -> RepoResult<UserStats> {
        let post_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM posts WHERE author_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let upvote_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(upvotes_count), 0) FROM posts WHERE author_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let comment_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comments WHERE author_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let saved_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM post_saves WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(UserStats {
            post_count,
            upvote_count,
            comment_count,
            saved_count,
        })
    }
}
