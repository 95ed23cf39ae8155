//! PostgreSQL repository implementations

mod comment;
mod community;
mod error;
mod member;
mod notification;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use community::PgCommunityRepository;
pub use member::PgMemberRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
