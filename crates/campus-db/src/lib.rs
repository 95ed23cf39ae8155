//! # campus-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `campus-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations (one transaction per logical mutation)
//! - SQL migrations (`migrations/`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campus_db::pool::{create_pool, DatabaseConfig};
//! use campus_db::PgPostRepository;
//! use campus_core::traits::PostRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let post_repo = PgPostRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgCommunityRepository, PgMemberRepository, PgNotificationRepository,
    PgPostRepository, PgUserRepository,
};
