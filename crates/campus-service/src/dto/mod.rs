//! Data transfer objects for the API boundary

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateCommentRequest, CreateCommunityRequest, CreatePostRequest, ListCommunitiesQuery,
    ListPostsQuery, LoginRequest, RefreshTokenRequest, RegisterRequest, UpdatePostRequest,
    UpdateUserRequest,
};
pub use responses::{
    AuthResponse, CommentResponse, CommunityResponse, CurrentUserResponse, HealthResponse,
    JoinResponse, LeaveResponse, MarkAllReadResponse, MemberResponse, MessageResponse,
    NotificationResponse, PaginatedResponse, PaginationMeta, PostResponse, PostStats,
    ReadinessResponse, SaveToggleResponse, UpvoteToggleResponse, UserResponse, UserStatsResponse,
};
