//! User model → entity mapper

use campus_core::entities::User;
use campus_core::error::DomainError;

use crate::models::UserModel;

use super::corrupt_enum;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            role: model.role.parse().map_err(corrupt_enum)?,
            avatar_url: model.avatar_url,
            college: model.college.parse().map_err(corrupt_enum)?,
            department: model.department,
            bio: model.bio,
            is_verified: model.is_verified,
            interests: model.interests.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
