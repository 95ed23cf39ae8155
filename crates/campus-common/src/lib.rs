//! # campus-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, JwtService, PasswordService, TokenPair, TokenType};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, ServerConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
pub use validation::{validate_email_domain, validate_interests, validate_password_strength};
