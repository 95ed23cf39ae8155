//! Community model → entity mappers

use campus_core::entities::{Community, CommunityMember};
use campus_core::error::DomainError;
use campus_core::traits::MemberProfile;

use crate::models::{CommunityMemberModel, CommunityModel, MemberProfileModel};

use super::corrupt_enum;

impl TryFrom<CommunityModel> for Community {
    type Error = DomainError;

    fn try_from(model: CommunityModel) -> Result<Self, Self::Error> {
        Ok(Community {
            id: model.id,
            name: model.name,
            description: model.description,
            member_count: model.member_count,
            community_type: model.community_type.parse().map_err(corrupt_enum)?,
            image_url: model.image_url,
            college: model.college,
            creator_id: model.creator_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<CommunityMemberModel> for CommunityMember {
    fn from(model: CommunityMemberModel) -> Self {
        CommunityMember {
            id: model.id,
            community_id: model.community_id,
            user_id: model.user_id,
            is_admin: model.is_admin,
            joined_at: model.joined_at,
        }
    }
}

/// Convert a member listing row into the domain profile
pub fn member_profile_from_model(model: MemberProfileModel) -> MemberProfile {
    MemberProfile {
        user_id: model.user_id,
        username: model.username,
        is_admin: model.is_admin,
        joined_at: model.joined_at,
    }
}
