//! Post model → entity mapper

use campus_core::entities::Post;
use campus_core::error::DomainError;
use campus_core::value_objects::College;

use crate::models::PostModel;

use super::corrupt_enum;

impl TryFrom<PostModel> for Post {
    type Error = DomainError;

    fn try_from(model: PostModel) -> Result<Self, Self::Error> {
        let target_colleges = model
            .target_colleges
            .0
            .iter()
            .map(|c| c.parse::<College>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt_enum)?;

        Ok(Post {
            id: model.id,
            post_type: model.post_type.parse().map_err(corrupt_enum)?,
            title: model.title,
            content: model.content,
            image_url: model.image_url,
            author_id: model.author_id,
            tags: model.tags.0,
            target_colleges,
            target_departments: model.target_departments.0,
            event_date: model.event_date,
            event_time: model.event_time,
            location: model.location,
            price: model.price,
            condition: model.condition,
            contact_info: model.contact_info,
            link_url: model.link_url,
            deadline: model.deadline,
            views: model.views,
            upvotes_count: model.upvotes_count,
            saves_count: model.saves_count,
            comments_count: model.comments_count,
            community_id: model.community_id,
            status: model.status.parse().map_err(corrupt_enum)?,
            is_pinned: model.is_pinned,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
