//! User service
//!
//! Profile reads/updates, public profiles, per-user post listings, and
//! aggregate statistics.

use campus_common::validation::validate_interests;
use campus_core::traits::{Page, PostFilter};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CurrentUserResponse, PaginatedResponse, PostResponse, UpdateUserRequest, UserResponse,
    UserStatsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::post::PostService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the authenticated user's profile
    #[instrument(skip(self))]
    pub async fn current_profile(&self, user_id: Uuid) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Partially update the authenticated user's profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(display_name) = request.display_name {
            user.display_name = display_name;
        }
        if let Some(avatar_url) = request.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(department) = request.department {
            user.department = department;
        }
        if let Some(interests) = request.interests {
            validate_interests(&interests)?;
            user.interests = interests;
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Get another user's public profile by username
    #[instrument(skip(self))]
    pub async fn profile_by_username(&self, username: &str) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        Ok(UserResponse::from(&user))
    }

    /// Posts authored by a user, looked up by username
    #[instrument(skip(self))]
    pub async fn user_posts(
        &self,
        username: &str,
        page: Page,
        viewer: Option<Uuid>,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        let filter = PostFilter {
            author_id: Some(user.id),
            ..PostFilter::default()
        };

        PostService::new(self.ctx)
            .list_filtered(&filter, page, viewer)
            .await
    }

    /// Aggregate statistics for the authenticated user
    #[instrument(skip(self))]
    pub async fn stats(&self, user_id: Uuid) -> ServiceResult<UserStatsResponse> {
        let stats = self.ctx.user_repo().stats(user_id).await?;
        Ok(UserStatsResponse::from(stats))
    }
}

#[cfg(test)]
mod tests {
    // Profile flows are exercised end-to-end in tests/integration.
}
