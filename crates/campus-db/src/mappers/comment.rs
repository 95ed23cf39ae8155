//! Comment model → entity mapper

use campus_core::entities::Comment;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            content: model.content,
            post_id: model.post_id,
            author_id: model.author_id,
            parent_id: model.parent_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
