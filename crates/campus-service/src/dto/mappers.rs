//! Entity → response DTO mappers

use campus_core::entities::{Community, Notification, Post, User};
use campus_core::traits::{MemberProfile, UserStats};

use super::responses::{
    CommunityResponse, CurrentUserResponse, MemberResponse, NotificationResponse, PostResponse,
    PostStats, UserResponse, UserStatsResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            avatar_url: user.avatar_url.clone(),
            college: user.college,
            department: user.department.clone(),
            bio: user.bio.clone(),
            is_verified: user.is_verified,
            interests: user.interests.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role,
            avatar_url: user.avatar_url.clone(),
            college: user.college,
            department: user.department.clone(),
            bio: user.bio.clone(),
            is_verified: user.is_verified,
            interests: user.interests.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            post_count: stats.post_count,
            upvote_count: stats.upvote_count,
            comment_count: stats.comment_count,
            saved_count: stats.saved_count,
        }
    }
}

impl PostResponse {
    /// Build a post response from the entity, its author, and viewer flags
    pub fn from_post(post: &Post, author: &User, is_upvoted: bool, is_saved: bool) -> Self {
        Self {
            id: post.id,
            post_type: post.post_type,
            title: post.title.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            target_colleges: post.target_colleges.clone(),
            target_departments: post.target_departments.clone(),
            image_url: post.image_url.clone(),
            author: UserResponse::from(author),
            stats: PostStats {
                views: post.views,
                comments: post.comments_count,
                upvotes: post.upvotes_count,
                saves: post.saves_count,
            },
            status: post.status,
            is_pinned: post.is_pinned,
            is_saved,
            is_upvoted,
            event_date: post.event_date,
            event_time: post.event_time.clone(),
            location: post.location.clone(),
            price: post.price.clone(),
            condition: post.condition.clone(),
            contact_info: post.contact_info.clone(),
            link_url: post.link_url.clone(),
            deadline: post.deadline,
            community_id: post.community_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl CommunityResponse {
    /// Build a community response with the viewer's membership flags
    pub fn from_community(community: &Community, is_member: bool, is_admin: bool) -> Self {
        Self {
            id: community.id,
            name: community.name.clone(),
            description: community.description.clone(),
            member_count: community.member_count,
            community_type: community.community_type,
            image_url: community.image_url.clone(),
            college: community.college.clone(),
            creator_id: community.creator_id,
            is_member,
            is_admin,
            created_at: community.created_at,
            updated_at: community.updated_at,
        }
    }
}

impl From<MemberProfile> for MemberResponse {
    fn from(profile: MemberProfile) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.username,
            is_admin: profile.is_admin,
            joined_at: profile.joined_at,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            notification_type: notification.notification_type,
            message: notification.message.clone(),
            read: notification.read,
            post_id: notification.post_id,
            comment_id: notification.comment_id,
            community_id: notification.community_id,
            meta: notification.meta.clone(),
            created_at: notification.created_at,
        }
    }
}
