//! Service context - dependency container for services
//!
//! Holds all repositories and other dependencies needed by services.

use std::sync::Arc;

use campus_common::auth::JwtService;
use campus_common::AuthConfig;
use campus_core::traits::{
    CommentRepository, CommunityRepository, MemberRepository, NotificationRepository,
    PostRepository, UserRepository,
};
use campus_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for authentication
/// - Registration policy (allowed email domains)
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    member_repo: Arc<dyn MemberRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    auth_config: Arc<AuthConfig>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        community_repo: Arc<dyn CommunityRepository>,
        member_repo: Arc<dyn MemberRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        jwt_service: Arc<JwtService>,
        auth_config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            post_repo,
            comment_repo,
            community_repo,
            member_repo,
            notification_repo,
            jwt_service,
            auth_config,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the community repository
    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the registration policy configuration
    pub fn auth_config(&self) -> &AuthConfig {
        self.auth_config.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    community_repo: Option<Arc<dyn CommunityRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    auth_config: Option<Arc<AuthConfig>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn community_repo(mut self, repo: Arc<dyn CommunityRepository>) -> Self {
        self.community_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn auth_config(mut self, config: Arc<AuthConfig>) -> Self {
        self.auth_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.community_repo
                .ok_or_else(|| ServiceError::validation("community_repo is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.auth_config
                .ok_or_else(|| ServiceError::validation("auth_config is required"))?,
        ))
    }
}
