//! Authentication service
//!
//! Handles user registration, login, and token refresh.

use campus_common::auth::{hash_password, verify_password};
use campus_common::validation::{
    validate_email_domain, validate_interests, validate_password_strength,
};
use campus_core::entities::{User, UserRole};
use chrono::Utc;
use rand::Rng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_email_domain(
            &request.email,
            &self.ctx.auth_config().allowed_email_domains,
        )?;
        validate_password_strength(&request.password)?;
        let interests = request.interests.unwrap_or_default();
        validate_interests(&interests)?;

        // Check if email already exists
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::Domain(
                campus_core::DomainError::EmailAlreadyExists,
            ));
        }

        // Derive the username from the email local part; on collision,
        // append a numeric suffix
        let mut username = User::username_from_email(&request.email);
        if self.ctx.user_repo().username_exists(&username).await? {
            let suffix: u16 = rand::thread_rng().gen_range(100..1000);
            username = format!("{username}{suffix}");
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4(),
            username,
            email: request.email,
            display_name: request.display_name,
            role: request.role.unwrap_or(UserRole::Student),
            avatar_url: request.avatar_url,
            college: request.college,
            department: request.department,
            bio: request.bio,
            is_verified: false,
            interests,
            created_at: Utc::now(),
            updated_at: None,
        };

        // Save to database
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, username = %user.username, "User registered successfully");

        self.issue_tokens(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(campus_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(campus_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(
                campus_common::AppError::InvalidCredentials,
            ));
        }

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user)
    }

    /// Rotate an access/refresh pair from a valid refresh token
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(refresh_token)
            .map_err(ServiceError::App)?;

        let user_id = claims.user_id().map_err(ServiceError::App)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::App(campus_common::AppError::InvalidToken))?;

        self.issue_tokens(&user)
    }

    /// Generate a token pair and wrap it with the user payload
    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(AuthResponse {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            token_type: token_pair.token_type,
            expires_in: token_pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    // Registration and login are exercised end-to-end in tests/integration.
}
