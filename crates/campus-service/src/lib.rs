//! # campus-service
//!
//! Application layer containing business logic and use cases.
//!
//! Services operate on a [`ServiceContext`] dependency container and expose
//! request/response DTOs to the API boundary.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::*;
pub use services::{
    AuthService, CommentService, CommunityService, NotificationService, PostService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
