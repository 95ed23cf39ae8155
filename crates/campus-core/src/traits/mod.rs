//! Repository traits (ports) for the data store

mod repositories;

pub use repositories::{
    CommentRepository, CommunityRepository, JoinOutcome, LeaveOutcome, MemberProfile,
    MemberRepository, NotificationFilter, NotificationRepository, Page, PostFilter,
    PostRepository, RepoResult, ToggleOutcome, UserRepository, UserStats,
};
